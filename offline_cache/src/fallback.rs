//! Synthesized responses served when neither network nor cache can help.

use crate::http::Response;

const OFFLINE_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Offline - Solar Monarch</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            background: linear-gradient(135deg, #0f0f23, #16213e, #1a1a2e);
            color: white;
            margin: 0;
            padding: 2rem;
            min-height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
            text-align: center;
        }
        .offline-content { max-width: 500px; }
        .offline-icon { font-size: 4rem; margin-bottom: 1rem; animation: pulse 2s infinite; }
        @keyframes pulse { 0%, 100% { opacity: 0.5; } 50% { opacity: 1; } }
        h1 { color: #00f5ff; margin-bottom: 1rem; }
        p { line-height: 1.6; margin-bottom: 1rem; }
        .retry-btn {
            background: linear-gradient(45deg, #00f5ff, #06ffa5);
            border: none;
            color: #0a0a1f;
            padding: 1rem 2rem;
            border-radius: 50px;
            font-weight: bold;
            cursor: pointer;
            margin-top: 1rem;
        }
    </style>
</head>
<body>
    <div class="offline-content">
        <div class="offline-icon">🛸</div>
        <h1>Space Connection Lost!</h1>
        <p>It looks like you're offline or having connection issues. The Solar Monarch adventures need an internet connection to access real NASA space weather data.</p>
        <p>Don't worry - some cached content may still be available!</p>
        <button class="retry-btn" onclick="location.reload()">🔄 Retry Connection</button>
    </div>
</body>
</html>
"#;

const PLACEHOLDER_SVG: &str = r##"<svg width="400" height="300" xmlns="http://www.w3.org/2000/svg">
    <rect width="400" height="300" fill="#1a1a2e"/>
    <circle cx="200" cy="150" r="50" fill="#00f5ff" opacity="0.3"/>
    <text x="200" y="200" text-anchor="middle" fill="#00f5ff" font-family="Arial" font-size="16">Image Loading...</text>
</svg>
"##;

/// Offline page for navigations that missed every cache.
pub fn offline_page() -> Response {
    Response::ok(OFFLINE_PAGE).with_content_type("text/html")
}

/// Stand-in for images that could not be fetched.
pub fn placeholder_image() -> Response {
    Response::ok(PLACEHOLDER_SVG).with_content_type("image/svg+xml")
}
