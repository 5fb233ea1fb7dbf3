//! Basic sanitization examples using the default policy

use html_whitelist_sanitizer::policy::SanitizePolicy;
use html_whitelist_sanitizer::sanitizer::HtmlSanitizer;

fn main() {
    println!("=== HTML Whitelist Sanitizer - Basic Examples ===\n");

    // Example 1: Script removal
    run(
        "Script removal",
        &HtmlSanitizer::new(),
        r#"<p>Safe content</p><script src="x.js">alert('xss')</script>"#,
    );

    // Example 2: Event handlers and javascript: URLs
    run(
        "Event handlers and javascript: URLs",
        &HtmlSanitizer::new(),
        r#"<a href="javascript:alert(1)" onclick="steal()">link</a><img src=x onerror=alert(1)>"#,
    );

    // Example 3: Style and class whitelists
    let policy = SanitizePolicy::default()
        .allow_style_properties(["color"])
        .allow_classes(["contain", "sider"]);
    run(
        "Style and class whitelists",
        &HtmlSanitizer::with_policy(policy),
        r#"<div class="contain sider float-right"><span style="color:#f00;font-size:19px;">right</span></div>"#,
    );

    // Example 4: Keeping the text of removed elements
    run(
        "Keeping text of removed elements",
        &HtmlSanitizer::with_policy(SanitizePolicy::default().with_keep_text(true)),
        "<form>username: <input name=u> <button>Login</button></form>",
    );

    // Example 5: Unclosed and empty elements
    run(
        "Unclosed and empty elements",
        &HtmlSanitizer::new(),
        "<div>first</div><div>second<p></p>",
    );
}

fn run(title: &str, sanitizer: &HtmlSanitizer, html: &str) {
    println!("{title}");
    println!("Input HTML:");
    println!("{html}\n");

    let result = sanitizer.sanitize(html).expect("Sanitization failed");

    println!("Output HTML:");
    println!("{}", result.html);
    println!("Removed: {:?}", result.removed.as_slice());
    println!("---\n");
}
