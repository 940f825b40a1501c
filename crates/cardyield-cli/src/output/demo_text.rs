use std::io;

use serde_json::Value;

use super::recommend_text::render_recommend;

pub fn render_demo(data: &Value) -> io::Result<String> {
    let body = render_recommend(data)?;
    Ok([
        "Demo: a sample household profile run against the bundled catalog.".to_string(),
        "Pass your own profile with `cardyield recommend <path>`.".to_string(),
        String::new(),
        body,
    ]
    .join("\n"))
}
