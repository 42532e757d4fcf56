//! Human-readable lines for the opaque slice payloads
//!
//! Payloads are passed through from the backend untouched, so nothing here
//! may assume a shape. Known fields are surfaced when present; anything
//! unrecognised falls back to listing top-level keys.

use serde_json::Value;
use weather_context::Slice;

/// Summary lines for one slice; empty when there is nothing to show yet
pub fn summarize(slice: Slice, payload: &Value) -> Vec<String> {
    if is_empty(payload) {
        return Vec::new();
    }

    let lines = match slice {
        Slice::Forecast => forecast(payload),
        Slice::AirQuality => air_quality(payload),
        Slice::FiveDayForecast => five_day(payload),
        Slice::UvIndex => uv_index(payload),
    };

    if lines.is_empty() {
        fallback(payload)
    } else {
        lines
    }
}

fn is_empty(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn number(value: &Value, pointer: &str) -> Option<f64> {
    value.pointer(pointer).and_then(Value::as_f64)
}

fn text<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str)
}

fn forecast(payload: &Value) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(name) = text(payload, "/name").filter(|n| !n.is_empty()) {
        lines.push(name.to_string());
    }
    if let Some(desc) = text(payload, "/weather/0/description") {
        lines.push(desc.to_string());
    }
    if let Some(temp) = number(payload, "/main/temp") {
        lines.push(format!("Temperature: {temp}"));
    }
    if let Some(feels) = number(payload, "/main/feels_like") {
        lines.push(format!("Feels like: {feels}"));
    }
    if let Some(humidity) = number(payload, "/main/humidity") {
        lines.push(format!("Humidity: {humidity}%"));
    }
    if let Some(wind) = number(payload, "/wind/speed") {
        lines.push(format!("Wind: {wind}"));
    }
    lines
}

/// Air quality index label, 1 (good) to 5 (very poor)
pub fn aqi_label(aqi: u64) -> &'static str {
    match aqi {
        1 => "Good",
        2 => "Fair",
        3 => "Moderate",
        4 => "Poor",
        5 => "Very Poor",
        _ => "Unknown",
    }
}

fn air_quality(payload: &Value) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(aqi) = payload.pointer("/list/0/main/aqi").and_then(Value::as_u64) {
        lines.push(format!("AQI: {} ({})", aqi, aqi_label(aqi)));
    }
    for (key, label) in [("pm2_5", "PM2.5"), ("pm10", "PM10"), ("no2", "NO2"), ("o3", "O3")] {
        if let Some(v) = number(payload, &format!("/list/0/components/{key}")) {
            lines.push(format!("{label}: {v}"));
        }
    }
    lines
}

fn five_day(payload: &Value) -> Vec<String> {
    let Some(entries) = payload.get("list").and_then(Value::as_array) else {
        return Vec::new();
    };

    // 3-hourly entries; one per day is enough for a glance
    entries
        .iter()
        .step_by(8)
        .take(5)
        .filter_map(|entry| {
            let when = text(entry, "/dt_txt")
                .map(|t| t.split(' ').next().unwrap_or(t).to_string())
                .or_else(|| entry.get("dt").and_then(Value::as_i64).map(|dt| dt.to_string()))?;
            let temp = number(entry, "/main/temp")?;
            let what = text(entry, "/weather/0/main").unwrap_or("");
            Some(format!("{when}: {temp} {what}").trim_end().to_string())
        })
        .collect()
}

/// UV index category
pub fn uv_label(uv: f64) -> &'static str {
    match uv {
        u if u < 3.0 => "Low",
        u if u < 6.0 => "Moderate",
        u if u < 8.0 => "High",
        u if u < 11.0 => "Very High",
        _ => "Extreme",
    }
}

fn uv_index(payload: &Value) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(uv) = number(payload, "/daily/uv_index_max/0") {
        lines.push(format!("UV index max: {uv} ({})", uv_label(uv)));
    }
    if let Some(uv) = number(payload, "/daily/uv_index_clear_sky_max/0") {
        lines.push(format!("Clear sky max: {uv}"));
    }
    lines
}

fn fallback(payload: &Value) -> Vec<String> {
    match payload {
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            vec![format!("Fields: {}", keys.join(", "))]
        }
        Value::Array(items) => vec![format!("{} entries", items.len())],
        other => vec![other.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_payload_has_no_lines() {
        for slice in Slice::ALL {
            assert!(summarize(slice, &json!({})).is_empty());
        }
    }

    #[test]
    fn test_forecast_fields() {
        let payload = json!({
            "name": "Oxford",
            "weather": [{ "main": "Clouds", "description": "broken clouds" }],
            "main": { "temp": 11.5, "feels_like": 10.2, "humidity": 81 },
            "wind": { "speed": 4.1 }
        });

        assert_eq!(
            summarize(Slice::Forecast, &payload),
            vec![
                "Oxford",
                "broken clouds",
                "Temperature: 11.5",
                "Feels like: 10.2",
                "Humidity: 81%",
                "Wind: 4.1",
            ]
        );
    }

    #[test]
    fn test_air_quality() {
        let payload = json!({
            "list": [{ "main": { "aqi": 2 }, "components": { "pm2_5": 3.4, "pm10": 5.0 } }]
        });

        assert_eq!(
            summarize(Slice::AirQuality, &payload),
            vec!["AQI: 2 (Fair)", "PM2.5: 3.4", "PM10: 5"]
        );
    }

    #[test]
    fn test_five_day_takes_one_entry_per_day() {
        let list: Vec<Value> = (0..16)
            .map(|i| {
                json!({
                    "dt_txt": format!("2024-05-{:02} {:02}:00:00", 1 + i / 8, (i % 8) * 3),
                    "main": { "temp": i },
                    "weather": [{ "main": "Rain" }]
                })
            })
            .collect();

        assert_eq!(
            summarize(Slice::FiveDayForecast, &json!({ "list": list })),
            vec!["2024-05-01: 0 Rain", "2024-05-02: 8 Rain"]
        );
    }

    #[test]
    fn test_uv_index() {
        let payload = json!({ "daily": { "uv_index_max": [6.5] } });
        assert_eq!(
            summarize(Slice::UvIndex, &payload),
            vec!["UV index max: 6.5 (High)"]
        );
    }

    #[test]
    fn test_unknown_shape_lists_keys() {
        let payload = json!({ "cod": "401", "message": "Invalid API key" });
        assert_eq!(
            summarize(Slice::Forecast, &payload),
            vec!["Fields: cod, message"]
        );
    }
}
