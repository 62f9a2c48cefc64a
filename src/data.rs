use serde_json::{json, Value};

/// Fallback content for the `test` data source. Raw (pre-normalization) records with numeric ids.
pub fn test_content() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "title": "Home Page",
            "content": "Welcome to our website. We offer a variety of services and products to meet your needs.",
            "url": "/index.html",
            "type": "pages",
            "date": "2025-01-15"
        }),
        json!({
            "id": 2,
            "title": "About Us",
            "content": "Our team is composed of dedicated experts providing innovative solutions for your business.",
            "url": "/about.html",
            "type": "pages",
            "date": "2025-01-10"
        }),
        json!({
            "id": 3,
            "title": "Services",
            "content": "Discover our professional services tailored to your specific needs.",
            "url": "/services.html",
            "type": "pages",
            "date": "2025-01-20"
        }),
    ]
}
