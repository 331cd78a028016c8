use super::{PhpFormatter, PhpKind};
use core_types::{IndentConfig, LineFormatter};

fn run(mut f: PhpFormatter, src: &str) -> Vec<i32> {
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
    run(PhpFormatter::for_fragment(IndentConfig::default()), src)
}

#[test]
fn function_body_after_open_bracket() {
    let src = "<?php\nfunction f($a) {\nreturn $a;\n}";
    assert_eq!(run(PhpFormatter::default(), src), vec![0, 0, 4, 0]);
}

#[test]
fn if_elseif_else_with_braces() {
    let src = "if ($a) {\necho 1;\n} elseif ($b) {\necho 2;\n} else {\necho 3;\n}";
    assert_eq!(indents(src), vec![0, 4, 0, 4, 0, 4, 0]);
}

#[test]
fn alternative_syntax_blocks() {
    let src = "if ($a):\necho 1;\nelseif ($b):\necho 2;\nelse:\necho 3;\nendif;\n\
               foreach ($xs as $x):\necho $x;\nendforeach;";
    assert_eq!(indents(src), vec![0, 4, 0, 4, 0, 4, 0, 0, 4, 0]);
}

#[test]
fn alternative_else_after_nested_braced_if() {
    let src = "if ($a):\nif ($b) {\nx();\n}\nelse:\ny();\nendif;\nz();";
    assert_eq!(indents(src), vec![0, 4, 8, 4, 0, 4, 0, 0]);
}

#[test]
fn switch_cases() {
    let src = "switch ($x) {\ncase 1:\necho 1;\nbreak;\ndefault:\necho 2;\n}";
    assert_eq!(indents(src), vec![0, 4, 8, 8, 4, 8, 0]);
}

#[test]
fn match_arms_are_not_statements() {
    let src = "$r = match ($x) {\n1, 2 => 'low',\ndefault => 'high',\n};\necho $r;";
    assert_eq!(indents(src), vec![0, 4, 4, 0, 0]);
}

#[test]
fn class_with_methods() {
    let src = "class A extends B {\npublic function f() {\nreturn 1;\n}\n}";
    assert_eq!(indents(src), vec![0, 4, 8, 4, 0]);
}

#[test]
fn closure_argument() {
    let src = "array_map(function ($x) {\nreturn $x;\n}, $xs);\necho 1;";
    assert_eq!(indents(src), vec![0, 4, 0, 0]);
}

#[test]
fn try_catch_finally() {
    let src = "try {\nf();\n} catch (E $e) {\ng();\n} finally {\nh();\n}";
    assert_eq!(indents(src), vec![0, 4, 0, 4, 0, 4, 0]);
}

#[test]
fn nested_arrays() {
    let src = "$a = [\n'x' => 1,\n'y' => [\n2,\n],\n];";
    assert_eq!(indents(src), vec![0, 4, 4, 8, 4, 0]);
}

#[test]
fn heredoc_body_keeps_user_indentation() {
    let src = "$q = <<<SQL\n  SELECT *\nSQL;\necho 1;";
    assert_eq!(indents(src), vec![0, 2, 0, 0]);
}

#[test]
fn markup_between_regions_keeps_user_indentation() {
    let src = "<?php if ($a) { ?>\n  <p>yes</p>\n<?php } ?>\ndone";
    assert_eq!(run(PhpFormatter::default(), src), vec![0, 2, 0, 0]);
}

#[test]
fn do_while() {
    assert_eq!(indents("do {\nx();\n} while ($y);\nz();"), vec![0, 4, 0, 0]);
}

#[test]
fn new_line_indent_after_a_line() {
    let mut f = PhpFormatter::for_fragment(IndentConfig::default());
    let start = f.initial_state();
    for (line, expected) in [("if ($a) {", 4), ("echo 1;", 0), ("$x = [", 4)] {
        let end = f.format_line(line, &start).end;
        assert_eq!(f.indent_for_new_line_after(&end), expected, "{line:?}");
    }
}

#[test]
fn finished_file_returns_to_the_root() {
    let mut f = PhpFormatter::default();
    let mut state = f.initial_state();
    for line in ["<?php", "if ($a):", "echo 1;", "endif;", "?>"] {
        state = f.format_line(line, &state).end;
    }
    assert_eq!(state.state_stack.len(), 1);
    assert_eq!(state.state_stack.top().map(|s| s.kind), Some(PhpKind::TopMost));
    assert!(!state.lexer_state.in_code);
}
