//! Synthetic documents for benchmarks and scaling tests.

pub const MARKUP_BLOCK: &str = "<div class=\"box\">\n<span>hello &amp; bye</span>\n<img src=\"x.png\">\n</div>\n";

pub const TEMPLATE_ROW: &str =
    "<?php foreach ($rows as $row): ?>\n<tr>\n<td><?= $row['name'] ?></td>\n</tr>\n<?php endforeach; ?>\n";

pub const SCRIPT_FUNCTION: &str =
    "function f(a, b) {\nif (a) {\nreturn [a,\nb];\n} else {\nreturn `t ${a}`;\n}\n}\n";

pub const STYLE_RULE: &str = ".box > span {\ncolor: red;\nmargin: 0 auto;\n}\n";

fn repeat(template: &str, count: usize) -> String {
    template.repeat(count)
}

pub fn markup_document(blocks: usize) -> String {
    let mut doc = String::from("<html>\n<body>\n");
    doc.push_str(&repeat(MARKUP_BLOCK, blocks));
    doc.push_str("</body>\n</html>\n");
    doc
}

/// Markup with style, script and server-script regions in every block.
pub fn mixed_document(blocks: usize) -> String {
    let mut doc = String::from("<html>\n<head>\n<style>\n");
    doc.push_str(&repeat(STYLE_RULE, 4));
    doc.push_str("</style>\n</head>\n<body>\n<table>\n");
    doc.push_str(&repeat(TEMPLATE_ROW, blocks));
    doc.push_str("</table>\n<script>\n");
    doc.push_str(&repeat(SCRIPT_FUNCTION, blocks));
    doc.push_str("</script>\n</body>\n</html>\n");
    doc
}

pub fn script_document(functions: usize) -> String {
    repeat(SCRIPT_FUNCTION, functions)
}

pub fn style_document(rules: usize) -> String {
    repeat(STYLE_RULE, rules)
}
