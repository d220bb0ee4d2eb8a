use mathdisplay::to_latex;

use crate::*;

const FORMULAS: &[&str] = &[
    "x_i^{n+1}",
    "\\frac12",
    "n \\over k",
    "\\sqrt[3]{x}",
    "\\hat x",
    "a\\quad b\\!c",
    "\\mathbf{xy}z",
    "\\begin{aligned} x &= 1 \\\\ y &= 2 \\end{aligned}",
    "\\begin{cases} 1 & x \\\\ 0 & y \\end{cases}",
];

#[test]
fn serialized_formulas() {
    let actual: String = FORMULAS
        .iter()
        .map(|f| to_latex(&parse(f)) + "\n")
        .collect();
    let expected = r"x^{n+1}_{i}
\frac{1}{2}
\frac{n}{k}
\sqrt[3]{x}
\hat{x}
a\quad b\! c
\mathbf{xy}z
\begin{aligned}x&=1\\ y&=2\end{aligned}
\begin{cases}1&x\\ 0&y\end{cases}
";
    assert_text_eq!(actual, expected);
}

#[test]
fn serialized_formulas_lay_out_identically() {
    let inputs = [
        "x^2_3 + \\frac{1}{2} - \\sqrt[n]{a+b}",
        "\\left( \\sum_{i=0}^\\infty x_i \\right)",
        "\\binom{n}{k} \\cdot \\overline{z}",
        "\\begin{pmatrix} 1 & 0 \\\\ 0 & 1 \\end{pmatrix}",
        "\\lim\\limits_{x \\to 0} \\frac{\\sin x}{x}",
        "\\color{#ff0000}{\\hat x} = \\underline{y}",
        "a\\mkern7.5mu b \\mkern-2mu c",
    ];
    for input in inputs {
        let serialized = to_latex(&parse(input));
        let original = layout(input);
        let reparsed = layout(&serialized);
        assert_near!(reparsed.width, original.width);
        assert_near!(reparsed.ascent, original.ascent);
        assert_near!(reparsed.descent, original.descent);
        assert_eq!(
            child_kinds(&reparsed),
            child_kinds(&original),
            "{} => {}",
            input,
            serialized
        );
    }
}
