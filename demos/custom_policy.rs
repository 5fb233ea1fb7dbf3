//! Building a policy from JSON and adding attribute hooks
//!
//! Shows a declarative policy loaded with serde, a tag rule whose `src` is
//! checked against a pattern, and a closure hook.

use html_whitelist_sanitizer::policy::{PolicyConfig, SanitizePolicy, TagRule};
use html_whitelist_sanitizer::sanitizer::HtmlSanitizer;
use html_whitelist_sanitizer::transform::PatternFilter;

const POLICY_JSON: &str = r#"{
    "tags": {
        "p": [],
        "a": ["href", "rel"],
        "img": ["src", "alt"],
        "br": []
    },
    "global_attributes": ["class", "title"],
    "css_classes": ["lead"],
    "keep_text": true
}"#;

fn main() {
    let config: PolicyConfig = serde_json::from_str(POLICY_JSON).expect("Invalid policy JSON");
    let youtube = PatternFilter::new(r"^https://www\.youtube\.com/embed/[A-Za-z0-9_-]{11}$")
        .expect("Invalid pattern");

    let policy = SanitizePolicy::from_config(config)
        .allow_tag(
            "iframe",
            TagRule::new()
                .transform("src", youtube)
                .allow("width")
                .allow("height"),
        )
        .allow_tag(
            "a",
            TagRule::new()
                .allow("href")
                .transform("rel", |_: &str| "nofollow noopener".to_string()),
        );

    let sanitizer = HtmlSanitizer::with_policy(policy);

    let inputs = [
        r#"<p class="lead intro">Hello <a href="/about" rel="me">about</a></p>"#,
        r#"<iframe src="https://www.youtube.com/embed/lBOwxXxesBo" width="560"></iframe>"#,
        r#"<iframe src="https://evil.example/embed" width="560"></iframe>"#,
        r#"<table><tr><td>cell text</td></tr></table><img src="a.png" alt="A" onerror="x()">"#,
    ];

    for html in inputs {
        let result = sanitizer.sanitize(html).expect("Sanitization failed");
        println!("in:      {html}");
        println!("out:     {}", result.html);
        println!("removed: {:?}\n", result.removed.as_slice());
    }
}
