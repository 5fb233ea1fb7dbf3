#![no_main]

use html_whitelist_sanitizer::policy::SanitizePolicy;
use html_whitelist_sanitizer::sanitizer::HtmlSanitizer;
use libfuzzer_sys::fuzz_target;

// Arbitrary bytes must never panic, and sanitizing the output again must
// succeed without removing anything.
fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);
    let keep_text = data.first().is_some_and(|b| b & 1 == 1);
    let sanitizer = HtmlSanitizer::with_policy(SanitizePolicy::default().with_keep_text(keep_text));

    let Ok(first) = sanitizer.sanitize(&html) else {
        return;
    };
    let second = sanitizer
        .sanitize(&first.html)
        .expect("sanitized output failed a second pass");
    assert!(
        second.removed.is_empty(),
        "second pass removed {:?} from {:?}",
        second.removed,
        first.html
    );
});
