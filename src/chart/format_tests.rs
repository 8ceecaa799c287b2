use super::*;

#[test]
fn escapes_markup_characters() {
    assert_eq!(html_escape("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
    assert_eq!(html_escape("plain"), "plain");
}

#[test]
fn thousands_grouping() {
    assert_eq!(format_thousands(0), "0");
    assert_eq!(format_thousands(999), "999");
    assert_eq!(format_thousands(1_000), "1,000");
    assert_eq!(format_thousands(1_234_567), "1,234,567");
}

#[test]
fn truncates_long_labels() {
    assert_eq!(truncate_label("short", 10), "short");
    assert_eq!(truncate_label("exactlyten", 10), "exactlyten");
    assert_eq!(truncate_label("a very long deck name", 10), "a very lo..");
}
