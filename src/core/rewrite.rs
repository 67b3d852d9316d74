// platform-switch - core/rewrite.rs
//
// Rendering pass. Consumes classified lines, tracks switchable-region
// state, and toggles the comment token on body lines so that only the
// active platform's section stays uncommented.
//
// Invariants:
//   - Output has exactly as many lines as the input, with the same
//     terminators.
//   - Marker lines and section headers are copied verbatim.
//   - Commenting never stacks a second token; uncommenting strips every
//     leading token, so a second run is a no-op.
//
// Comment style is taken from the file: when most commented lines inside
// switchable regions read `// x`, lines are re-commented as `// x` and
// uncommenting drops that one space, so `// x` files round-trip as
// exactly as `//x` files do.

use crate::core::classify::Classifier;
use crate::core::model::{Line, LineKind, OutsideRegionPolicy, Platform, RewriteStats, SwitchSyntax};
use crate::util::constants;
use std::borrow::Cow;

/// Everything the renderer needs to know about a run.
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    /// Platform whose section stays active.
    pub platform: Platform,

    pub syntax: SwitchSyntax,

    pub outside_region: OutsideRegionPolicy,
}

impl RewriteOptions {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            syntax: SwitchSyntax::default(),
            outside_region: OutsideRegionPolicy::default(),
        }
    }
}

/// Classify and rewrite `content` in one call.
pub fn rewrite_content(content: &str, options: &RewriteOptions) -> (String, RewriteStats) {
    let classifier = Classifier::new(&options.syntax);
    let lines = classifier.classify(content);
    render(&lines, options)
}

/// Render classified lines for the active platform.
pub fn render(lines: &[Line<'_>], options: &RewriteOptions) -> (String, RewriteStats) {
    let style = CommentStyle::detect(lines, &options.syntax.comment_token);
    let mut out = String::with_capacity(lines.iter().map(|l| l.text.len() + 3).sum());
    let mut stats = RewriteStats::default();

    let mut in_region = false;
    let mut region_start = 0usize;
    // Current section and whether it belongs to another platform.
    let mut section: Option<&str> = None;
    let mut inactive_section = false;

    for line in lines {
        stats.lines += 1;

        let edit: Option<Edit> = match line.kind {
            LineKind::MarkerStart => {
                if in_region {
                    push_warning(
                        &mut stats,
                        format!(
                            "line {}: start marker inside region opened at line {region_start}",
                            line.number
                        ),
                    );
                }
                in_region = true;
                region_start = line.number;
                section = None;
                stats.regions += 1;
                None
            }
            LineKind::MarkerEnd => {
                if !in_region {
                    push_warning(
                        &mut stats,
                        format!("line {}: end marker without a matching start", line.number),
                    );
                }
                in_region = false;
                section = None;
                None
            }
            LineKind::SectionHeader { label } if in_region => {
                if Platform::from_label(label).is_none() {
                    push_warning(
                        &mut stats,
                        format!(
                            "line {}: section '{label}' does not name a known platform; \
                             its lines will be commented",
                            line.number
                        ),
                    );
                }
                section = Some(label);
                inactive_section = !options.platform.matches_label(label);
                None
            }
            _ if !in_region => outside_edit(line.text, options, &style),
            _ => match section {
                // Lines between the start marker and the first header
                // belong to no platform.
                None => None,
                Some(_) if inactive_section => comment_line(line.text, &style).map(Edit::Commented),
                Some(_) => uncomment_line(line.text, &style).map(Edit::Uncommented),
            },
        };

        let text: Cow<'_, str> = match edit {
            Some(Edit::Commented(s)) => {
                stats.commented += 1;
                Cow::Owned(s)
            }
            Some(Edit::Uncommented(s)) => {
                stats.uncommented += 1;
                Cow::Owned(s)
            }
            None => {
                stats.unchanged += 1;
                Cow::Borrowed(line.text)
            }
        };

        out.push_str(&text);
        out.push_str(line.terminator);
    }

    if in_region {
        push_warning(
            &mut stats,
            format!("region opened at line {region_start} is never closed"),
        );
    }

    tracing::trace!(
        lines = stats.lines,
        regions = stats.regions,
        spaced = style.spaced,
        commented = stats.commented,
        uncommented = stats.uncommented,
        "Render complete"
    );

    (out, stats)
}

/// A changed line, tagged by the direction of the change.
enum Edit {
    Commented(String),
    Uncommented(String),
}

fn outside_edit(text: &str, options: &RewriteOptions, style: &CommentStyle<'_>) -> Option<Edit> {
    match options.outside_region {
        OutsideRegionPolicy::Preserve => None,
        OutsideRegionPolicy::Uncomment => uncomment_line(text, style).map(Edit::Uncommented),
        OutsideRegionPolicy::LabelMatch => {
            if text.contains(options.platform.label())
                || text.contains(constants::GENERIC_MARKER_TOKEN)
            {
                uncomment_line(text, style).map(Edit::Uncommented)
            } else {
                comment_line(text, style).map(Edit::Commented)
            }
        }
    }
}

fn push_warning(stats: &mut RewriteStats, message: String) {
    if stats.warnings.len() < constants::MAX_WARNINGS_PER_FILE {
        tracing::debug!(warning = %message, "Region structure warning");
        stats.warnings.push(message);
    }
}

/// How body lines are commented: the token, and whether a single space
/// separates it from the code (`// x` rather than `//x`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStyle<'a> {
    pub token: &'a str,
    pub spaced: bool,
}

impl<'a> CommentStyle<'a> {
    /// Compact `//x` style.
    pub fn compact(token: &'a str) -> Self {
        Self {
            token,
            spaced: false,
        }
    }

    /// Majority vote over commented body lines inside switchable regions.
    /// Ties (including files with no commented lines) use the compact style.
    pub fn detect(lines: &[Line<'_>], token: &'a str) -> Self {
        let mut in_region = false;
        let (mut spaced, mut compact) = (0usize, 0usize);
        for line in lines {
            match line.kind {
                LineKind::MarkerStart => in_region = true,
                LineKind::MarkerEnd => in_region = false,
                LineKind::Body if in_region => {
                    let (_, body) = split_indent(line.text);
                    if let Some(after) = strip_tokens(body, token) {
                        if after.starts_with(' ') {
                            spaced += 1;
                        } else if !after.is_empty() {
                            compact += 1;
                        }
                    }
                }
                _ => {}
            }
        }
        Self {
            token,
            spaced: spaced > compact,
        }
    }
}

/// Split a line into its leading whitespace and the rest.
fn split_indent(text: &str) -> (&str, &str) {
    let body = text.trim_start();
    (&text[..text.len() - body.len()], body)
}

/// Remove every leading copy of `token` from `body`. When the token is a
/// single repeated character (`//`, `#`), leftover copies of that character
/// go too, so `///x` does not leave a stray `/`. Returns `None` when `body`
/// does not start with the token.
fn strip_tokens<'b>(body: &'b str, token: &str) -> Option<&'b str> {
    if token.is_empty() || !body.starts_with(token) {
        return None;
    }
    let mut rest = body;
    while let Some(stripped) = rest.strip_prefix(token) {
        rest = stripped;
    }
    let mut chars = token.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c == first) {
            rest = rest.trim_start_matches(first);
        }
    }
    Some(rest)
}

/// Insert the token after the indentation. Returns `None` when the line is
/// blank or already commented.
pub fn comment_line(text: &str, style: &CommentStyle<'_>) -> Option<String> {
    let (indent, body) = split_indent(text);
    if body.is_empty() || body.starts_with(style.token) {
        return None;
    }
    let gap = if style.spaced { " " } else { "" };
    Some(format!("{indent}{}{gap}{body}", style.token))
}

/// Strip every leading token after the indentation, plus the one space a
/// spaced style puts after it. Returns `None` when the line carries no
/// token.
pub fn uncomment_line(text: &str, style: &CommentStyle<'_>) -> Option<String> {
    let (indent, body) = split_indent(text);
    let mut rest = strip_tokens(body, style.token)?;
    if style.spaced {
        rest = rest.strip_prefix(' ').unwrap_or(rest);
    }
    Some(format!("{indent}{rest}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SECTIONS: &str = "{\n\
        \x20   // PLATFORM_SWITCH_START\n\
        \x20   // Windows Configuration\n\
        \x20   \"cmake.generator\": \"Visual Studio 17 2022\",\n\
        \x20   // MacOS Configuration\n\
        \x20   //\"cmake.generator\": \"Ninja\",\n\
        \x20   // PLATFORM_SWITCH_END\n\
        \x20   \"editor.tabSize\": 4\n\
        }\n";

    fn run(content: &str, platform: Platform) -> (String, RewriteStats) {
        rewrite_content(content, &RewriteOptions::new(platform))
    }

    #[test]
    fn test_windows_keeps_windows_line_active() {
        let (out, stats) = run(TWO_SECTIONS, Platform::Windows);
        assert_eq!(out, TWO_SECTIONS, "fixture is already in Windows form");
        assert!(!stats.changed());
        assert_eq!(stats.regions, 1);
        assert!(stats.warnings.is_empty(), "{:?}", stats.warnings);
    }

    #[test]
    fn test_macos_swaps_active_section() {
        let (out, stats) = run(TWO_SECTIONS, Platform::MacOS);
        assert!(out.contains("    //\"cmake.generator\": \"Visual Studio 17 2022\",\n"));
        assert!(out.contains("    \"cmake.generator\": \"Ninja\",\n"));
        assert_eq!(stats.commented, 1);
        assert_eq!(stats.uncommented, 1);
    }

    #[test]
    fn test_round_trip_restores_original() {
        let (mac, _) = run(TWO_SECTIONS, Platform::MacOS);
        let (back, _) = run(&mac, Platform::Windows);
        assert_eq!(back, TWO_SECTIONS);
    }

    #[test]
    fn test_idempotent_for_every_platform() {
        for p in Platform::all() {
            let (once, _) = run(TWO_SECTIONS, *p);
            let (twice, stats) = run(&once, *p);
            assert_eq!(once, twice, "second run changed output for {p}");
            assert!(!stats.changed());
        }
    }

    #[test]
    fn test_linux_comments_both_sections() {
        let (out, _) = run(TWO_SECTIONS, Platform::Linux);
        assert!(out.contains("    //\"cmake.generator\": \"Visual Studio 17 2022\",\n"));
        assert!(out.contains("    //\"cmake.generator\": \"Ninja\",\n"));
        assert!(!out.contains("////"));
    }

    #[test]
    fn test_marker_and_header_lines_never_modified() {
        for p in Platform::all() {
            let (out, _) = run(TWO_SECTIONS, *p);
            let before: Vec<_> = TWO_SECTIONS.lines().collect();
            let after: Vec<_> = out.lines().collect();
            assert_eq!(before.len(), after.len());
            for (b, a) in before.iter().zip(&after) {
                if b.contains("PLATFORM_SWITCH") || b.contains("Configuration") {
                    assert_eq!(b, a);
                }
            }
        }
    }

    #[test]
    fn test_file_without_markers_is_byte_identical() {
        let content = "// leading comment\r\n{\r\n    //\"a\": 1,\r\n  \"b\": 2\r\n}";
        for p in Platform::all() {
            let (out, stats) = run(content, *p);
            assert_eq!(out, content);
            assert_eq!(stats.unchanged, 5);
        }
    }

    #[test]
    fn test_crlf_terminators_preserved_inside_region() {
        let content = "// PLATFORM_SWITCH_START\r\n// Linux Configuration\r\n//x\r\n// PLATFORM_SWITCH_END\r\n";
        let (out, _) = run(content, Platform::Linux);
        assert_eq!(
            out,
            "// PLATFORM_SWITCH_START\r\n// Linux Configuration\r\nx\r\n// PLATFORM_SWITCH_END\r\n"
        );
    }

    #[test]
    fn test_lines_before_first_header_and_blank_lines_untouched() {
        let content = "// PLATFORM_SWITCH_START\n\"shared\": 1,\n// MacOS Configuration\n\n   \n\"mac\": 1,\n// PLATFORM_SWITCH_END\n";
        let (out, _) = run(content, Platform::Windows);
        assert_eq!(
            out,
            "// PLATFORM_SWITCH_START\n\"shared\": 1,\n// MacOS Configuration\n\n   \n//\"mac\": 1,\n// PLATFORM_SWITCH_END\n"
        );
    }

    #[test]
    fn test_uncomment_strips_stacked_tokens() {
        let content = "// PLATFORM_SWITCH_START\n// Windows Configuration\n  ////\"a\": 1\n// PLATFORM_SWITCH_END\n";
        let (out, stats) = run(content, Platform::Windows);
        assert!(out.contains("\n  \"a\": 1\n"));
        assert_eq!(stats.uncommented, 1);
    }

    #[test]
    fn test_unknown_section_label_is_commented_with_warning() {
        let content = "// PLATFORM_SWITCH_START\n// Solaris Configuration\n\"x\": 1\n// PLATFORM_SWITCH_END\n";
        let (out, stats) = run(content, Platform::Linux);
        assert!(out.contains("//\"x\": 1"));
        assert_eq!(stats.warnings.len(), 1);
        assert!(stats.warnings[0].contains("Solaris"));
    }

    #[test]
    fn test_unterminated_region_warns_and_still_rewrites() {
        let content = "// PLATFORM_SWITCH_START\n// MacOS Configuration\n//\"x\": 1\n";
        let (out, stats) = run(content, Platform::MacOS);
        assert!(out.ends_with("\"x\": 1\n"));
        assert!(stats.warnings.iter().any(|w| w.contains("never closed")));
    }

    #[test]
    fn test_stray_end_marker_warns() {
        let content = "\"a\": 1\n// PLATFORM_SWITCH_END\n";
        let (out, stats) = run(content, Platform::Windows);
        assert_eq!(out, content);
        assert_eq!(stats.warnings.len(), 1);
    }

    #[test]
    fn test_header_outside_region_is_plain_body() {
        let content = "// Windows Configuration\n//\"a\": 1\n";
        let (out, stats) = run(content, Platform::MacOS);
        assert_eq!(out, content);
        assert!(stats.warnings.is_empty());
    }

    #[test]
    fn test_uncomment_policy_strips_outside_region() {
        let options = RewriteOptions {
            outside_region: OutsideRegionPolicy::Uncomment,
            ..RewriteOptions::new(Platform::Linux)
        };
        let (out, _) = rewrite_content("//\"a\": 1\n\"b\": 2\n", &options);
        assert_eq!(out, "\"a\": 1\n\"b\": 2\n");
    }

    #[test]
    fn test_label_match_policy() {
        let options = RewriteOptions {
            outside_region: OutsideRegionPolicy::LabelMatch,
            ..RewriteOptions::new(Platform::Windows)
        };
        let (out, _) = rewrite_content("//\"path\": \"Windows SDK\",\n\"other\": 1,\n", &options);
        assert_eq!(out, "\"path\": \"Windows SDK\",\n//\"other\": 1,\n");
    }

    #[test]
    fn test_comment_and_uncomment_helpers() {
        let style = CommentStyle::compact("//");
        assert_eq!(comment_line("  x", &style).as_deref(), Some("  //x"));
        assert_eq!(comment_line("  //x", &style), None);
        assert_eq!(comment_line("   ", &style), None);
        assert_eq!(uncomment_line("\t//x", &style).as_deref(), Some("\tx"));
        assert_eq!(uncomment_line("x // y", &style), None);
        assert_eq!(uncomment_line("  ///x", &style).as_deref(), Some("  x"));
    }

    #[test]
    fn test_spaced_style_helpers() {
        let style = CommentStyle {
            token: "//",
            spaced: true,
        };
        assert_eq!(comment_line("  x", &style).as_deref(), Some("  // x"));
        assert_eq!(uncomment_line("  // x", &style).as_deref(), Some("  x"));
        assert_eq!(uncomment_line("  //x", &style).as_deref(), Some("  x"));
    }

    #[test]
    fn test_triple_slash_leaves_no_stray_prefix() {
        let content = "{\n    // PLATFORM_SWITCH_START\n    // Windows Configuration\n    ///\"a\": 1,\n    // PLATFORM_SWITCH_END\n}\n";
        let (out, stats) = run(content, Platform::Windows);
        assert!(out.contains("\n    \"a\": 1,\n"), "got:\n{out}");
        assert!(!out.contains("/\"a\""));
        assert_eq!(stats.uncommented, 1);
    }

    #[test]
    fn test_prose_comment_does_not_end_active_section() {
        let content = "// PLATFORM_SWITCH_START\n// Windows Configuration\n    \"v\": 0,\n    // Debug configuration below\n    \"w\": 1,\n// MacOS Configuration\n    //\"m\": 1,\n// PLATFORM_SWITCH_END\n";
        let (out, stats) = run(content, Platform::Windows);
        assert!(out.contains("\n    \"w\": 1,\n"), "got:\n{out}");
        assert!(out.contains("\n    //\"m\": 1,\n"));
        assert!(stats.warnings.is_empty(), "{:?}", stats.warnings);
    }

    #[test]
    fn test_spaced_comment_style_round_trips() {
        let content = "{\n    // PLATFORM_SWITCH_START\n    // Windows Configuration\n    \"w\": 1,\n    // MacOS Configuration\n    // \"m\": 1,\n    // PLATFORM_SWITCH_END\n}\n";
        let (mac, _) = run(content, Platform::MacOS);
        assert!(mac.contains("\n    // \"w\": 1,\n"), "got:\n{mac}");
        assert!(mac.contains("\n    \"m\": 1,\n"), "got:\n{mac}");
        let (back, _) = run(&mac, Platform::Windows);
        assert_eq!(back, content);
    }

    #[test]
    fn test_style_detection_majority() {
        let classifier = Classifier::new(&SwitchSyntax::default());
        let spaced = classifier.classify("// PLATFORM_SWITCH_START\n// Linux Configuration\n// a\n// b\n//c\n// PLATFORM_SWITCH_END\n");
        assert!(CommentStyle::detect(&spaced, "//").spaced);
        let none = classifier.classify("\"a\": 1\n");
        assert!(!CommentStyle::detect(&none, "//").spaced);
    }
}
