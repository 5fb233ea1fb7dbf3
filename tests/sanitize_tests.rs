//! End-to-end sanitization tests
//!
//! These tests run complete passes (parse, clean, render) and check the
//! emitted markup and removal log for known inputs, including the classic XSS
//! vectors a whitelist sanitizer has to neutralize.

use html_whitelist_sanitizer::output::serialize_children;
use html_whitelist_sanitizer::policy::{SanitizePolicy, TagRule};
use html_whitelist_sanitizer::sanitizer::HtmlSanitizer;
use html_whitelist_sanitizer::transform::PatternFilter;
use html_whitelist_sanitizer::{SanitizeError, clean, parse_html};
use regex::Regex;
use std::sync::Arc;

const YOUTUBE_EMBED: &str =
    r"^(?:https?://)?(?:www[.])?(?:youtube[.]com/embed/|youtu[.]be/)([^&]{11})";

fn sanitize(html: &str, policy: &SanitizePolicy) -> (String, Vec<String>) {
    let result = HtmlSanitizer::with_policy(policy.clone())
        .sanitize(html)
        .expect("sanitize failed");
    (result.html, result.removed.into_vec())
}

/// Policy used by the fixture suite: colors and two classes allowed, tables
/// replaced by a YouTube-only iframe rule, disallowed wrappers keep their text
fn fixture_policy() -> SanitizePolicy {
    let mut policy = SanitizePolicy::default()
        .allow_style_properties(["color"])
        .allow_classes(["contain", "sider"])
        .with_keep_text(true);

    policy.remove_from_tag_whitelist(["table"]);
    policy.remove_from_tag_whitelist(["tr", "th", "td"]);
    policy.merge_tag_whitelist([(
        "iframe",
        TagRule::new()
            .transform("src", PatternFilter::new(YOUTUBE_EMBED).unwrap())
            .allow("width")
            .allow("height")
            .allow("frameborder")
            .allow("allowfullscreen"),
    )]);
    policy
}

#[test]
fn test_class_whitelist() {
    let policy = SanitizePolicy::default().allow_classes(["contain", "sider"]);
    let (html, removed) = sanitize(r#"<div class="contain sider float-right">right</div>"#, &policy);

    assert_eq!(html, r#"<div class="contain sider">right</div>"#);
    assert!(removed.is_empty());
}

#[test]
fn test_script_is_removed() {
    let (html, removed) = sanitize(r#"<script src="x.js"></script>"#, &SanitizePolicy::default());

    assert_eq!(html, "");
    assert_eq!(removed, vec!["script"]);
}

#[test]
fn test_javascript_src_on_void_element() {
    let (html, _) = sanitize(r#"<img src="javascript:alert(1)">"#, &SanitizePolicy::default());
    assert_eq!(html, r#"<img src="">"#);
}

#[test]
fn test_javascript_href_keeps_link() {
    let (html, removed) = sanitize(r#"<a href="javascript:x">text</a>"#, &SanitizePolicy::default());

    assert_eq!(html, r#"<a href="">text</a>"#);
    assert!(removed.is_empty());
}

#[test]
fn test_keep_text_reattaches_content() {
    let policy = SanitizePolicy::default().with_keep_text(true);
    let (html, removed) = sanitize("<form><button>Login</button></form>", &policy);

    assert_eq!(html, "Login");
    // The button was never visited: the form took its whole subtree with it.
    assert_eq!(removed, vec!["form"]);
}

#[test]
fn test_style_and_empty_class_whitelist() {
    let policy = SanitizePolicy::default().allow_style_properties(["color"]);
    let (html, _) = sanitize(
        r#"<span style="color:#f00;font-size:19px;" class="x">t</span>"#,
        &policy,
    );

    assert_eq!(html, r#"<span style="color:#f00;" class="">t</span>"#);
}

#[test]
fn test_fixture_nested_inline_content() {
    let (html, _) = sanitize(
        "<div class=\"contain\"><span style=\"color: #f00;\"><p>test中文</p>\n<br/><br>line2</span></div>",
        &fixture_policy(),
    );

    assert_eq!(
        html,
        "<div class=\"contain\"><span style=\"color:#f00;\"><p>test中文</p>\n<br><br>line2</span></div>"
    );
}

#[test]
fn test_fixture_iframe_hook_accepts_youtube() {
    let (html, _) = sanitize(
        r#"<iframe width="560" height="315" src="https://www.youtube.com/embed/lBOwxXxesBo" frameborder="0" allowfullscreen></iframe>"#,
        &fixture_policy(),
    );

    assert_eq!(
        html,
        r#"<iframe width="560" height="315" src="https://www.youtube.com/embed/lBOwxXxesBo" frameborder="0" allowfullscreen=""></iframe>"#
    );
}

#[test]
fn test_fixture_iframe_hook_blanks_other_hosts() {
    let (html, _) = sanitize(
        r#"<iframe width="560" height="315" src="https://www.94cb.com/" frameborder="0" allowfullscreen></iframe>"#,
        &fixture_policy(),
    );

    assert_eq!(
        html,
        r#"<iframe width="560" height="315" src="" frameborder="0" allowfullscreen=""></iframe>"#
    );
}

#[test]
fn test_fixture_script_with_attributes() {
    let (html, removed) = sanitize(
        r#"<script type="text/javascript" charset="utf-8" src="/static/js/jquery.js"></script>"#,
        &fixture_policy(),
    );

    assert_eq!(html, "");
    assert_eq!(removed, vec!["script"]);
}

#[test]
fn test_fixture_image_attributes() {
    let (html, _) = sanitize(
        r#"<img src="http://127.0.0.1/upload/donate_small.png" width="251" height="250" />"#,
        &fixture_policy(),
    );

    assert_eq!(
        html,
        r#"<img src="http://127.0.0.1/upload/donate_small.png" width="251" height="250">"#
    );
}

#[test]
fn test_fixture_unquoted_javascript_src() {
    let (html, _) = sanitize("<IMG SRC=javascript:alert('XSS')>", &fixture_policy());
    assert_eq!(html, r#"<img src="">"#);
}

#[test]
fn test_fixture_unclosed_tags() {
    let (html, _) = sanitize("<div>xxxx</div><div>dddd", &fixture_policy());
    assert_eq!(html, "<div>xxxx</div><div>dddd</div>");

    let (html, _) = sanitize(r#"<div class="">content</div><div>"#, &fixture_policy());
    assert_eq!(html, r#"<div class="">content</div><div></div>"#);
}

#[test]
fn test_fixture_attribute_filter() {
    let input = "<div class=\"contain\" data-src=\"xxx\" onclick=\"javascript:alert('xxx');\">\n\
<audio controls = \"play\">\n\
<source src=\"horse.ogg\" type=\"audio/ogg\" /><source src=\"horse.mp3\" type=\"audio/mpeg\" />\n\
Your browser does not support the audio element.\n\
</audio>\n\
</div>";
    let expected = "<div class=\"contain\" data-src=\"xxx\">\n\
<audio controls=\"play\">\n\
<source src=\"horse.ogg\" type=\"audio/ogg\"><source src=\"horse.mp3\" type=\"audio/mpeg\">\n\
Your browser does not support the audio element.\n\
</audio>\n\
</div>";

    let (html, removed) = sanitize(input, &fixture_policy());
    assert_eq!(html, expected);
    assert!(removed.is_empty());
}

#[test]
fn test_fixture_style_filter() {
    let (html, _) = sanitize(
        r#"<span style="color: #f00;font-size: 19px;float:right;" class="aabc">test</span>"#,
        &fixture_policy(),
    );
    assert_eq!(html, r#"<span style="color:#f00;" class="">test</span>"#);
}

#[test]
fn test_fixture_broken_quote_javascript_url() {
    let (html, _) = sanitize(r#"<a href="JavaScript:alert("xss");">link</a>"#, &fixture_policy());
    assert_eq!(html, r#"<a href="">link</a>"#);
}

#[test]
fn test_fixture_disallowed_form_keeps_text() {
    let (html, removed) = sanitize(
        r#"<div class="form"><form action="login" method="post">username: lincanbin  <button>Login</button></form></div>"#,
        &fixture_policy(),
    );

    assert_eq!(html, r#"<div class="">username: lincanbin  Login</div>"#);
    assert_eq!(removed, vec!["form"]);
}

#[test]
fn test_fixture_removed_table_tags() {
    let (html, removed) = sanitize(
        "<table><tbody><tr><td>cell</td></tr></tbody></table>",
        &fixture_policy(),
    );

    assert_eq!(html, "cell");
    assert_eq!(removed, vec!["table"]);
}

#[test]
fn test_event_handlers_everywhere() {
    let (html, _) = sanitize(
        r#"<p onclick="a()">x</p><img src="i.png" onerror="b()"><div onmouseover="c()" title="ok">y</div>"#,
        &SanitizePolicy::default(),
    );

    assert_eq!(html, r#"<p>x</p><img src="i.png"><div title="ok">y</div>"#);
}

#[test]
fn test_javascript_scheme_variants() {
    let cases = [
        r#"<a href="JAVASCRIPT:alert(1)">x</a>"#,
        r#"<a href=" javascript:alert(1)">x</a>"#,
        "<a href=\"java\tscript:alert(1)\">x</a>",
        r#"<a href="&#106;avascript:alert(1)">x</a>"#,
    ];

    for case in cases {
        let (html, _) = sanitize(case, &SanitizePolicy::default());
        assert_eq!(html, r#"<a href="">x</a>"#, "input: {case}");
    }
}

#[test]
fn test_safe_urls_survive() {
    let (html, _) = sanitize(
        r##"<a href="https://example.com/a?b=c&amp;d=e#f">x</a><a href="#top">y</a>"##,
        &SanitizePolicy::default(),
    );

    assert_eq!(
        html,
        r##"<a href="https://example.com/a?b=c&amp;d=e#f">x</a><a href="#top">y</a>"##
    );
}

#[test]
fn test_text_entities_stay_escaped() {
    let (html, _) = sanitize("<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>", &SanitizePolicy::default());
    assert_eq!(html, "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>");
}

#[test]
fn test_dangerous_containers_are_removed() {
    let (html, removed) = sanitize(
        r#"<p>keep</p><object data="x.swf"></object><style>body{}</style><svg><script>x</script></svg><math></math>"#,
        &SanitizePolicy::default(),
    );

    assert_eq!(html, "<p>keep</p>");
    assert_eq!(removed, vec!["math", "svg", "style", "object"]);
}

#[test]
fn test_strict_policy() {
    let mut policy = SanitizePolicy::default();
    policy.clear_tag_whitelist();
    policy.merge_tag_whitelist([("b", TagRule::new())]);

    let (html, removed) = sanitize("<div><b>b</b> <i>c</i></div>", &policy.clone().with_keep_text(true));
    // A pruned subtree collapses to its text, allowed descendants included.
    assert_eq!(html, "b c");
    assert_eq!(removed, vec!["div"]);

    let (html, removed) = sanitize("<b>b</b> <i>c</i>", &policy);
    assert_eq!(html, "<b>b</b>");
    assert_eq!(removed, vec!["i"]);
}

#[test]
fn test_second_pass_changes_nothing() {
    let policy = fixture_policy();
    let inputs = [
        r#"<div class="contain sider float-right">right</div>"#,
        r#"<span style="color:#f00;font-size:19px;" class="x">t</span><div></div>"#,
        "<form><button>Login</button></form><img src=javascript:x>",
    ];

    for input in inputs {
        let (first, _) = sanitize(input, &policy);
        let (second, removed) = sanitize(&first, &policy);
        assert_eq!(first, second);
        assert!(removed.is_empty());
    }
}

#[test]
fn test_depth_limit_is_reported() {
    let policy = SanitizePolicy::default().with_max_depth(50);
    let html = "<div>".repeat(60);

    let err = HtmlSanitizer::with_policy(policy).sanitize(&html).unwrap_err();
    assert!(matches!(err, SanitizeError::DepthLimit { max: 50, .. }));
    assert_eq!(err.code(), 3);
}

#[test]
fn test_deep_nesting_without_limit() {
    let html = format!("{}x", "<b>".repeat(1200));

    let result = HtmlSanitizer::new().sanitize(&html).unwrap();

    assert!(result.removed.is_empty());
    assert_eq!(result.html.matches("<b>").count(), 1200);
    assert_eq!(result.html.matches("</b>").count(), 1200);
}

#[test]
fn test_comment_markers_inside_attribute_values() {
    let (html, removed) = sanitize(
        r#"<p title="<!--">secret</p><a title="-->" href="/x">y</a>"#,
        &SanitizePolicy::default(),
    );

    assert!(removed.is_empty());
    let (paragraph, link) = html.split_once("</p>").unwrap();
    assert!(paragraph.starts_with("<p title="));
    assert!(paragraph.ends_with(">secret"));
    assert!(!paragraph.contains("href"));
    assert!(link.starts_with("<a title="));
    assert!(link.ends_with(r#" href="/x">y</a>"#));
}

#[test]
fn test_style_without_survivors_keeps_terminator() {
    let policy = SanitizePolicy::default().allow_style_properties(["color"]);
    let (html, _) = sanitize(r#"<span style="font-size:19px">t</span>"#, &policy);

    assert_eq!(html, r#"<span style=";">t</span>"#);
    assert_eq!(sanitize(&html, &policy).0, html);
}

#[test]
fn test_cleaning_twice_changes_nothing() {
    let input = r#"<table><thead><tr><th>head</th></tr></thead><tbody><tr><td onclick="x()">cell</td></tr></tbody></table>
<div class="contain other" style="color:red;float:left"><form>user <button>go</button></form><p></p></div>
<!-- note --><a href="javascript:x">link</a><script>alert(1)</script><img src="a.png" onerror="y()">"#;

    for keep_text in [false, true] {
        let policy = SanitizePolicy::default()
            .allow_style_properties(["color"])
            .allow_classes(["contain"])
            .with_keep_text(keep_text);
        let document = parse_html(input).unwrap();
        let body = document.body().unwrap();

        let first = clean(&body, &policy).unwrap();
        let after_first = serialize_children(&body).unwrap();
        assert!(first.removed.contains("thead"), "keep_text={keep_text}");
        assert!(first.removed.contains("form"), "keep_text={keep_text}");

        let second = clean(&first.root, &policy).unwrap();

        assert!(second.removed.is_empty(), "keep_text={keep_text}: {:?}", second.removed);
        assert_eq!(serialize_children(&body).unwrap(), after_first, "keep_text={keep_text}");
    }
}

#[test]
fn test_prebuilt_pattern_filter() {
    let pattern = Regex::new(r"^/media/").unwrap();
    let filter = PatternFilter::from_regex(pattern);
    assert_eq!(filter.as_str(), "^/media/");

    let policy = SanitizePolicy::default().allow_tag(
        "video",
        TagRule::new().transform("src", filter).allow("controls"),
    );
    let (html, _) = sanitize(
        r#"<video src="/media/a.mp4" controls></video><video src="https://x/b.mp4"></video>"#,
        &policy,
    );

    assert_eq!(
        html,
        r#"<video src="/media/a.mp4" controls=""></video><video src=""></video>"#
    );
}

#[test]
fn test_clean_entry_point_returns_root_and_log() {
    let policy = SanitizePolicy::default();
    let document = parse_html("<p>a</p><embed src=x.swf><applet></applet>").unwrap();
    let body = document.body().unwrap();

    let cleaned = clean(&body, &policy).unwrap();

    assert!(std::rc::Rc::ptr_eq(&cleaned.root, &body));
    assert_eq!(cleaned.removed.as_slice(), ["applet"]);
}

#[test]
fn test_shared_policy_across_threads() {
    let sanitizer = Arc::new(HtmlSanitizer::with_policy(fixture_policy()));

    std::thread::scope(|scope| {
        for i in 0..4 {
            let sanitizer = Arc::clone(&sanitizer);
            scope.spawn(move || {
                let input = format!(r#"<p class="contain x">{i}</p><script>{i}</script>"#);
                let result = sanitizer.sanitize(&input).unwrap();
                assert_eq!(result.html, format!(r#"<p class="contain">{i}</p>{i}"#));
            });
        }
    });
}
