use super::{HtmlFormatter, HtmlKind, MarkupKind};
use crate::config::HtmlConfig;
use core_types::{IndentConfig, Language, LineFormatter};
use php::PhpKind;

fn indents_with(html: HtmlConfig, src: &str) -> Vec<i32> {
    let mut f = HtmlFormatter::new(IndentConfig::default(), html);
    let mut state = f.initial_state();
    let mut out = Vec::new();
    for line in src.lines() {
        let outcome = f.format_line(line, &state);
        out.push(outcome.line_indent);
        state = outcome.end;
    }
    out
}

fn indents(src: &str) -> Vec<i32> {
    indents_with(HtmlConfig::default(), src)
}

#[test]
fn element_bodies_are_indented() {
    assert_eq!(indents("<div>\n<p>Hi</p>\n</div>"), vec![0, 4, 0]);
    assert_eq!(
        indents("<ul>\n<li>\none\n</li>\n</ul>"),
        vec![0, 4, 8, 4, 0]
    );
}

#[test]
fn results_ignore_the_users_indentation() {
    assert_eq!(indents("      <div>\n<p>Hi</p>\n            </div>"), vec![0, 4, 0]);
}

#[test]
fn void_and_self_closing_elements_add_no_level() {
    assert_eq!(indents("<div>\n<br>\n<img src=\"a.png\" />\n<p>x</p>\n</div>"), vec![0, 4, 4, 4, 0]);
}

#[test]
fn attributes_on_later_lines_hang_one_level() {
    assert_eq!(
        indents("<input\ntype=\"text\"\n/>\n<p>"),
        vec![0, 4, 0, 0]
    );
    assert_eq!(
        indents("<div\nclass=\"a\"\n>\ntext\n</div>"),
        vec![0, 4, 0, 4, 0]
    );
}

#[test]
fn element_after_text_does_not_add_a_level() {
    assert_eq!(indents("<p>\nHello <b>world\n</b>\n</p>"), vec![0, 4, 4, 0]);
}

#[test]
fn comment_interiors_keep_the_users_indent() {
    assert_eq!(
        indents("<div>\n<!-- a\n      b -->\n</div>"),
        vec![0, 4, 6, 0]
    );
}

#[test]
fn doctype_and_comments_do_not_nest() {
    assert_eq!(
        indents("<!DOCTYPE html>\n<html>\n<!-- c -->\n<body>\n</body>\n</html>"),
        vec![0, 0, 4, 4, 4, 0]
    );
}

#[test]
fn script_bodies_use_the_script_automaton() {
    let src = "<script>\nvar a = 1;\nif (a) {\nb();\n}\n</script>\n<p>";
    assert_eq!(indents(src), vec![0, 4, 4, 8, 4, 0, 0]);
}

#[test]
fn style_bodies_use_the_style_automaton() {
    let src = "<style>\n.a {\ncolor: red;\n}\n</style>";
    assert_eq!(indents(src), vec![0, 4, 8, 4, 0]);
}

#[test]
fn container_indentation_can_be_switched_off() {
    let html = HtmlConfig {
        indent_script: false,
        indent_style: true,
    };
    let src = "<script>\nvar a = 1;\nif (a) {\nb();\n}\n</script>";
    assert_eq!(indents_with(html, src), vec![0, 0, 0, 4, 0, 0]);
    assert_eq!(indents_with(html, "<style>\na {}\n</style>"), vec![0, 4, 0]);
}

#[test]
fn server_script_region_inside_an_element() {
    assert_eq!(
        indents("<div>\n<?php\necho 1;\n?>\n</div>"),
        vec![0, 4, 4, 4, 0]
    );
}

#[test]
fn open_statement_ends_at_the_close_bracket() {
    assert_eq!(indents("<?php echo $a ?>\n<p>\nx"), vec![0, 0, 4]);
}

#[test]
fn markup_inside_a_braced_server_script_block() {
    let src = "<?php if ($a) { ?>\n<p>a</p>\n<?php } else { ?>\n<p>b</p>\n<?php } ?>\n<p>c</p>";
    assert_eq!(indents(src), vec![0, 4, 0, 4, 0, 0]);
}

#[test]
fn alternative_syntax_template() {
    let src = "<ul>\n<?php foreach ($items as $item): ?>\n<li><?= $item ?></li>\n<?php endforeach; ?>\n</ul>";
    assert_eq!(indents(src), vec![0, 4, 8, 4, 0]);
}

#[test]
fn nested_alternative_syntax_blocks() {
    let src = "<?php if ($a): ?>\n<?php if ($b): ?>\n<div>\nx\n</div>\n<?php endif; ?>\n<?php endif; ?>";
    assert_eq!(indents(src), vec![0, 4, 8, 12, 8, 4, 0]);
}

#[test]
fn server_script_block_closed_inside_a_script_body() {
    let src = "<div>\n<script>\n<?php if ($a) { ?>\nvar x = 1;\n<?php } ?>\nvar y = 2;\n</script>\n<p>after</p>\n</div>\n<p>top</p>";
    assert_eq!(indents(src), vec![0, 4, 8, 12, 8, 8, 4, 4, 0, 0]);
}

#[test]
fn server_script_block_closed_inside_a_style_body() {
    let src = "<div>\n<style>\n<?php if ($a) { ?>\n.a { color: red; }\n<?php } ?>\n.b { color: blue; }\n</style>\n</div>\n<p>top</p>";
    assert_eq!(indents(src), vec![0, 4, 8, 12, 8, 8, 4, 0, 0]);
}

#[test]
fn server_script_island_in_an_attribute() {
    assert_eq!(indents("<a href=\"<?= $url ?>\">\nlink\n</a>"), vec![0, 4, 0]);
}

#[test]
fn suspended_server_script_states_survive_markup() {
    let mut f = HtmlFormatter::default();
    let begin = f.initial_state();
    let outcome = f.format_line("<?php if ($a) { ?>", &begin);
    let end = &outcome.end;
    assert!(end.stored_state_stack.is_empty());
    assert_eq!(
        end.other_state_stack.top().map(|s| s.kind),
        Some(HtmlKind::Markup(MarkupKind::Stashed))
    );
    assert!(
        end.other_state_stack
            .iter()
            .any(|s| s.kind == HtmlKind::ServerScript(PhpKind::Block))
    );
    assert_eq!(end.state_stack.top().map(|s| s.kind), Some(HtmlKind::Markup(MarkupKind::ServerBlock)));
    assert_eq!(end.indent_depth, 4);
}

#[test]
fn open_region_stashes_the_markup_stack() {
    let mut f = HtmlFormatter::default();
    let mut state = f.initial_state();
    for line in ["<div>", "<?php"] {
        state = f.format_line(line, &state).end;
    }
    assert_eq!(state.state_stack.len(), 2);
    assert_eq!(
        state.state_stack.top().map(|s| s.kind),
        Some(HtmlKind::ServerScript(PhpKind::TopMost))
    );
    assert_eq!(
        state.stored_state_stack.top().map(|s| s.kind),
        Some(HtmlKind::Markup(MarkupKind::Stashed))
    );
    assert!(state.lexer_state.in_server_script());
}

#[test]
fn new_line_indent_follows_the_open_context() {
    let mut f = HtmlFormatter::default();
    let mut state = f.initial_state();
    for line in ["<div>", "<script>", "if (a) {"] {
        state = f.format_line(line, &state).end;
    }
    assert_eq!(f.indent_for_new_line_after(&state), 12);

    let state = f.format_line("<!-- open", &f.initial_state()).end;
    assert_eq!(f.indent_for_new_line_after(&state), 0);
}

#[test]
fn tokens_carry_their_language() {
    let mut f = HtmlFormatter::default();
    let begin = f.initial_state();
    let outcome = f.format_line("<p style=\"x\"><?= $a ?></p><script>f()</script>", &begin);
    let languages: Vec<_> = outcome.tokens.iter().map(|t| t.language).collect();
    assert!(languages.contains(&Language::Markup));
    assert!(languages.contains(&Language::ServerScript));
    assert!(languages.contains(&Language::Script));
    assert_eq!(outcome.end.state_stack.len(), 1);
    assert_eq!(outcome.end.indent_depth, 0);
}

#[test]
fn stray_end_tags_are_tolerated() {
    assert_eq!(indents("</div>\n</span>\n<p>\nx"), vec![0, 0, 0, 4]);
}

#[cfg(feature = "serde")]
#[test]
fn line_state_round_trips_through_json() {
    let mut f = HtmlFormatter::default();
    let mut state = f.initial_state();
    for line in ["<div>", "<?php if ($a): ?>", "<script>", "var s = `a"] {
        state = f.format_line(line, &state).end;
    }
    let json = serde_json::to_string(&state).unwrap();
    let back: core_types::LineState<HtmlKind, crate::lexer::HtmlLexState> =
        serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
}
