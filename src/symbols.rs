//! Static registries of LaTeX command names.
//!
//! Tables are plain data, indexed once on first use. There is no runtime
//! registration: the set of commands is fixed at build time.
//! Reverse lookups (atom to command name) prefer the shortest name,
//! then the alphabetically first one.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::atom::{AtomType, FontStyle, LineStyle, MathAtom};

#[derive(Debug, Clone, Copy)]
enum Sym {
    Atom(AtomType, &'static str),
    Op(&'static str, bool),
    Space(f32),
    Style(LineStyle),
}

use AtomType::{
    BinaryOperator as Bin, Close, Open, Ordinary as Ord, Placeholder, Punctuation as Punct,
    Relation as Rel, Variable as Var,
};

const COMMANDS: &[(&str, Sym)] = &[
    ("square", Sym::Atom(Placeholder, "\u{25A1}")),
    // Greek
    ("alpha", Sym::Atom(Var, "\u{03B1}")),
    ("beta", Sym::Atom(Var, "\u{03B2}")),
    ("gamma", Sym::Atom(Var, "\u{03B3}")),
    ("delta", Sym::Atom(Var, "\u{03B4}")),
    ("varepsilon", Sym::Atom(Var, "\u{03B5}")),
    ("zeta", Sym::Atom(Var, "\u{03B6}")),
    ("eta", Sym::Atom(Var, "\u{03B7}")),
    ("theta", Sym::Atom(Var, "\u{03B8}")),
    ("iota", Sym::Atom(Var, "\u{03B9}")),
    ("kappa", Sym::Atom(Var, "\u{03BA}")),
    ("lambda", Sym::Atom(Var, "\u{03BB}")),
    ("mu", Sym::Atom(Var, "\u{03BC}")),
    ("nu", Sym::Atom(Var, "\u{03BD}")),
    ("xi", Sym::Atom(Var, "\u{03BE}")),
    ("omicron", Sym::Atom(Var, "\u{03BF}")),
    ("pi", Sym::Atom(Var, "\u{03C0}")),
    ("rho", Sym::Atom(Var, "\u{03C1}")),
    ("varsigma", Sym::Atom(Var, "\u{03C2}")),
    ("sigma", Sym::Atom(Var, "\u{03C3}")),
    ("tau", Sym::Atom(Var, "\u{03C4}")),
    ("upsilon", Sym::Atom(Var, "\u{03C5}")),
    ("varphi", Sym::Atom(Var, "\u{03C6}")),
    ("chi", Sym::Atom(Var, "\u{03C7}")),
    ("psi", Sym::Atom(Var, "\u{03C8}")),
    ("omega", Sym::Atom(Var, "\u{03C9}")),
    ("vartheta", Sym::Atom(Var, "\u{03D1}")),
    ("phi", Sym::Atom(Var, "\u{03D5}")),
    ("varpi", Sym::Atom(Var, "\u{03D6}")),
    ("varkappa", Sym::Atom(Var, "\u{03F0}")),
    ("varrho", Sym::Atom(Var, "\u{03F1}")),
    ("epsilon", Sym::Atom(Var, "\u{03F5}")),
    ("Gamma", Sym::Atom(Var, "\u{0393}")),
    ("Delta", Sym::Atom(Var, "\u{0394}")),
    ("Theta", Sym::Atom(Var, "\u{0398}")),
    ("Lambda", Sym::Atom(Var, "\u{039B}")),
    ("Xi", Sym::Atom(Var, "\u{039E}")),
    ("Pi", Sym::Atom(Var, "\u{03A0}")),
    ("Sigma", Sym::Atom(Var, "\u{03A3}")),
    ("Upsilon", Sym::Atom(Var, "\u{03A5}")),
    ("Phi", Sym::Atom(Var, "\u{03A6}")),
    ("Psi", Sym::Atom(Var, "\u{03A8}")),
    ("Omega", Sym::Atom(Var, "\u{03A9}")),
    // Open
    ("lceil", Sym::Atom(Open, "\u{2308}")),
    ("lfloor", Sym::Atom(Open, "\u{230A}")),
    ("langle", Sym::Atom(Open, "\u{27E8}")),
    ("lgroup", Sym::Atom(Open, "\u{27EE}")),
    // Close
    ("rceil", Sym::Atom(Close, "\u{2309}")),
    ("rfloor", Sym::Atom(Close, "\u{230B}")),
    ("rangle", Sym::Atom(Close, "\u{27E9}")),
    ("rgroup", Sym::Atom(Close, "\u{27EF}")),
    // Arrows
    ("leftarrow", Sym::Atom(Rel, "\u{2190}")),
    ("uparrow", Sym::Atom(Rel, "\u{2191}")),
    ("rightarrow", Sym::Atom(Rel, "\u{2192}")),
    ("downarrow", Sym::Atom(Rel, "\u{2193}")),
    ("leftrightarrow", Sym::Atom(Rel, "\u{2194}")),
    ("updownarrow", Sym::Atom(Rel, "\u{2195}")),
    ("nwarrow", Sym::Atom(Rel, "\u{2196}")),
    ("nearrow", Sym::Atom(Rel, "\u{2197}")),
    ("searrow", Sym::Atom(Rel, "\u{2198}")),
    ("swarrow", Sym::Atom(Rel, "\u{2199}")),
    ("mapsto", Sym::Atom(Rel, "\u{21A6}")),
    ("Leftarrow", Sym::Atom(Rel, "\u{21D0}")),
    ("Uparrow", Sym::Atom(Rel, "\u{21D1}")),
    ("Rightarrow", Sym::Atom(Rel, "\u{21D2}")),
    ("Downarrow", Sym::Atom(Rel, "\u{21D3}")),
    ("Leftrightarrow", Sym::Atom(Rel, "\u{21D4}")),
    ("Updownarrow", Sym::Atom(Rel, "\u{21D5}")),
    ("longleftarrow", Sym::Atom(Rel, "\u{27F5}")),
    ("longrightarrow", Sym::Atom(Rel, "\u{27F6}")),
    ("longleftrightarrow", Sym::Atom(Rel, "\u{27F7}")),
    ("Longleftarrow", Sym::Atom(Rel, "\u{27F8}")),
    ("Longrightarrow", Sym::Atom(Rel, "\u{27F9}")),
    ("Longleftrightarrow", Sym::Atom(Rel, "\u{27FA}")),
    // Relations
    ("leq", Sym::Atom(Rel, "\u{2264}")),
    ("geq", Sym::Atom(Rel, "\u{2265}")),
    ("neq", Sym::Atom(Rel, "\u{2260}")),
    ("in", Sym::Atom(Rel, "\u{2208}")),
    ("notin", Sym::Atom(Rel, "\u{2209}")),
    ("ni", Sym::Atom(Rel, "\u{220B}")),
    ("propto", Sym::Atom(Rel, "\u{221D}")),
    ("mid", Sym::Atom(Rel, "\u{2223}")),
    ("parallel", Sym::Atom(Rel, "\u{2225}")),
    ("sim", Sym::Atom(Rel, "\u{223C}")),
    ("simeq", Sym::Atom(Rel, "\u{2243}")),
    ("cong", Sym::Atom(Rel, "\u{2245}")),
    ("approx", Sym::Atom(Rel, "\u{2248}")),
    ("asymp", Sym::Atom(Rel, "\u{224D}")),
    ("doteq", Sym::Atom(Rel, "\u{2250}")),
    ("equiv", Sym::Atom(Rel, "\u{2261}")),
    ("gg", Sym::Atom(Rel, "\u{226A}")),
    ("ll", Sym::Atom(Rel, "\u{226B}")),
    ("prec", Sym::Atom(Rel, "\u{227A}")),
    ("succ", Sym::Atom(Rel, "\u{227B}")),
    ("subset", Sym::Atom(Rel, "\u{2282}")),
    ("supset", Sym::Atom(Rel, "\u{2283}")),
    ("subseteq", Sym::Atom(Rel, "\u{2286}")),
    ("supseteq", Sym::Atom(Rel, "\u{2287}")),
    ("sqsubset", Sym::Atom(Rel, "\u{228F}")),
    ("sqsupset", Sym::Atom(Rel, "\u{2290}")),
    ("sqsubseteq", Sym::Atom(Rel, "\u{2291}")),
    ("sqsupseteq", Sym::Atom(Rel, "\u{2292}")),
    ("models", Sym::Atom(Rel, "\u{22A7}")),
    ("perp", Sym::Atom(Rel, "\u{27C2}")),
    // Binary operators
    ("times", Sym::Atom(Bin, "\u{00D7}")),
    ("div", Sym::Atom(Bin, "\u{00F7}")),
    ("pm", Sym::Atom(Bin, "\u{00B1}")),
    ("dagger", Sym::Atom(Bin, "\u{2020}")),
    ("ddagger", Sym::Atom(Bin, "\u{2021}")),
    ("mp", Sym::Atom(Bin, "\u{2213}")),
    ("setminus", Sym::Atom(Bin, "\u{2216}")),
    ("ast", Sym::Atom(Bin, "\u{2217}")),
    ("circ", Sym::Atom(Bin, "\u{2218}")),
    ("bullet", Sym::Atom(Bin, "\u{2219}")),
    ("wedge", Sym::Atom(Bin, "\u{2227}")),
    ("vee", Sym::Atom(Bin, "\u{2228}")),
    ("cap", Sym::Atom(Bin, "\u{2229}")),
    ("cup", Sym::Atom(Bin, "\u{222A}")),
    ("wr", Sym::Atom(Bin, "\u{2240}")),
    ("uplus", Sym::Atom(Bin, "\u{228E}")),
    ("sqcap", Sym::Atom(Bin, "\u{2293}")),
    ("sqcup", Sym::Atom(Bin, "\u{2294}")),
    ("oplus", Sym::Atom(Bin, "\u{2295}")),
    ("ominus", Sym::Atom(Bin, "\u{2296}")),
    ("otimes", Sym::Atom(Bin, "\u{2297}")),
    ("oslash", Sym::Atom(Bin, "\u{2298}")),
    ("odot", Sym::Atom(Bin, "\u{2299}")),
    ("star", Sym::Atom(Bin, "\u{22C6}")),
    ("cdot", Sym::Atom(Bin, "\u{22C5}")),
    ("amalg", Sym::Atom(Bin, "\u{2A3F}")),
    // Operators without limits
    ("log", Sym::Op("log", false)),
    ("lg", Sym::Op("lg", false)),
    ("ln", Sym::Op("ln", false)),
    ("sin", Sym::Op("sin", false)),
    ("arcsin", Sym::Op("arcsin", false)),
    ("sinh", Sym::Op("sinh", false)),
    ("cos", Sym::Op("cos", false)),
    ("arccos", Sym::Op("arccos", false)),
    ("cosh", Sym::Op("cosh", false)),
    ("tan", Sym::Op("tan", false)),
    ("arctan", Sym::Op("arctan", false)),
    ("tanh", Sym::Op("tanh", false)),
    ("cot", Sym::Op("cot", false)),
    ("coth", Sym::Op("coth", false)),
    ("sec", Sym::Op("sec", false)),
    ("csc", Sym::Op("csc", false)),
    ("arg", Sym::Op("arg", false)),
    ("ker", Sym::Op("ker", false)),
    ("dim", Sym::Op("dim", false)),
    ("hom", Sym::Op("hom", false)),
    ("exp", Sym::Op("exp", false)),
    ("deg", Sym::Op("deg", false)),
    // Operators with limits
    ("lim", Sym::Op("lim", true)),
    ("limsup", Sym::Op("lim sup", true)),
    ("liminf", Sym::Op("lim inf", true)),
    ("max", Sym::Op("max", true)),
    ("min", Sym::Op("min", true)),
    ("sup", Sym::Op("sup", true)),
    ("inf", Sym::Op("inf", true)),
    ("det", Sym::Op("det", true)),
    ("Pr", Sym::Op("Pr", true)),
    ("gcd", Sym::Op("gcd", true)),
    // Large operators
    ("prod", Sym::Op("\u{220F}", true)),
    ("coprod", Sym::Op("\u{2210}", true)),
    ("sum", Sym::Op("\u{2211}", true)),
    ("int", Sym::Op("\u{222B}", false)),
    ("oint", Sym::Op("\u{222E}", false)),
    ("bigwedge", Sym::Op("\u{22C0}", true)),
    ("bigvee", Sym::Op("\u{22C1}", true)),
    ("bigcap", Sym::Op("\u{22C2}", true)),
    ("bigcup", Sym::Op("\u{22C3}", true)),
    ("bigodot", Sym::Op("\u{2A00}", true)),
    ("bigoplus", Sym::Op("\u{2A01}", true)),
    ("bigotimes", Sym::Op("\u{2A02}", true)),
    ("biguplus", Sym::Op("\u{2A04}", true)),
    ("bigsqcup", Sym::Op("\u{2A06}", true)),
    // Escaped characters
    ("{", Sym::Atom(Open, "{")),
    ("}", Sym::Atom(Close, "}")),
    ("$", Sym::Atom(Ord, "$")),
    ("&", Sym::Atom(Ord, "&")),
    ("#", Sym::Atom(Ord, "#")),
    ("%", Sym::Atom(Ord, "%")),
    ("_", Sym::Atom(Ord, "_")),
    (" ", Sym::Atom(Ord, " ")),
    ("backslash", Sym::Atom(Ord, "\\")),
    // Punctuation
    ("colon", Sym::Atom(Punct, ":")),
    ("cdotp", Sym::Atom(Punct, "\u{00B7}")),
    // Other symbols
    ("degree", Sym::Atom(Ord, "\u{00B0}")),
    ("neg", Sym::Atom(Ord, "\u{00AC}")),
    ("angstrom", Sym::Atom(Ord, "\u{00C5}")),
    ("|", Sym::Atom(Ord, "\u{2016}")),
    ("vert", Sym::Atom(Ord, "|")),
    ("ldots", Sym::Atom(Ord, "\u{2026}")),
    ("prime", Sym::Atom(Ord, "\u{2032}")),
    ("hbar", Sym::Atom(Ord, "\u{210F}")),
    ("Im", Sym::Atom(Ord, "\u{2111}")),
    ("ell", Sym::Atom(Ord, "\u{2113}")),
    ("wp", Sym::Atom(Ord, "\u{2118}")),
    ("Re", Sym::Atom(Ord, "\u{211C}")),
    ("mho", Sym::Atom(Ord, "\u{2127}")),
    ("aleph", Sym::Atom(Ord, "\u{2135}")),
    ("forall", Sym::Atom(Ord, "\u{2200}")),
    ("exists", Sym::Atom(Ord, "\u{2203}")),
    ("emptyset", Sym::Atom(Ord, "\u{2205}")),
    ("nabla", Sym::Atom(Ord, "\u{2207}")),
    ("infty", Sym::Atom(Ord, "\u{221E}")),
    ("angle", Sym::Atom(Ord, "\u{2220}")),
    ("top", Sym::Atom(Ord, "\u{22A4}")),
    ("bot", Sym::Atom(Ord, "\u{22A5}")),
    ("vdots", Sym::Atom(Ord, "\u{22EE}")),
    ("cdots", Sym::Atom(Ord, "\u{22EF}")),
    ("ddots", Sym::Atom(Ord, "\u{22F1}")),
    ("triangle", Sym::Atom(Ord, "\u{25B3}")),
    ("imath", Sym::Atom(Ord, "\u{1D6A4}")),
    ("jmath", Sym::Atom(Ord, "\u{1D6A5}")),
    ("partial", Sym::Atom(Ord, "\u{1D715}")),
    // Spaces
    (",", Sym::Space(3.0)),
    (">", Sym::Space(4.0)),
    (";", Sym::Space(5.0)),
    ("!", Sym::Space(-3.0)),
    ("quad", Sym::Space(18.0)),
    ("qquad", Sym::Space(36.0)),
    // Styles
    ("displaystyle", Sym::Style(LineStyle::Display)),
    ("textstyle", Sym::Style(LineStyle::Text)),
    ("scriptstyle", Sym::Style(LineStyle::Script)),
    ("scriptscriptstyle", Sym::Style(LineStyle::ScriptScript)),
];

const ALIASES: &[(&str, &str)] = &[
    ("lnot", "neg"),
    ("land", "wedge"),
    ("lor", "vee"),
    ("ne", "neq"),
    ("le", "leq"),
    ("ge", "geq"),
    ("lbrace", "{"),
    ("rbrace", "}"),
    ("Vert", "|"),
    ("gets", "leftarrow"),
    ("to", "rightarrow"),
    ("iff", "Longleftrightarrow"),
    ("AA", "angstrom"),
];

const ACCENTS: &[(&str, &str)] = &[
    ("grave", "\u{0300}"),
    ("acute", "\u{0301}"),
    ("hat", "\u{0302}"),
    ("tilde", "\u{0303}"),
    ("bar", "\u{0304}"),
    ("breve", "\u{0306}"),
    ("dot", "\u{0307}"),
    ("ddot", "\u{0308}"),
    ("check", "\u{030C}"),
    ("vec", "\u{20D7}"),
    ("widehat", "\u{0302}"),
    ("widetilde", "\u{0303}"),
];

const DELIMITERS: &[(&str, &str)] = &[
    (".", ""),
    ("(", "("),
    (")", ")"),
    ("[", "["),
    ("]", "]"),
    ("<", "\u{2329}"),
    (">", "\u{232A}"),
    ("/", "/"),
    ("\\", "\\"),
    ("|", "|"),
    ("lgroup", "\u{27EE}"),
    ("rgroup", "\u{27EF}"),
    ("||", "\u{2016}"),
    ("Vert", "\u{2016}"),
    ("vert", "|"),
    ("uparrow", "\u{2191}"),
    ("downarrow", "\u{2193}"),
    ("updownarrow", "\u{2195}"),
    ("Uparrow", "\u{21D1}"),
    ("Downarrow", "\u{21D3}"),
    ("Updownarrow", "\u{21D5}"),
    ("backslash", "\\"),
    ("rangle", "\u{232A}"),
    ("langle", "\u{2329}"),
    ("rbrace", "}"),
    ("}", "}"),
    ("{", "{"),
    ("lbrace", "{"),
    ("lceil", "\u{2308}"),
    ("rceil", "\u{2309}"),
    ("lfloor", "\u{230A}"),
    ("rfloor", "\u{230B}"),
];

const FONT_STYLES: &[(&str, FontStyle)] = &[
    ("mathnormal", FontStyle::Default),
    ("mathrm", FontStyle::Roman),
    ("textrm", FontStyle::Roman),
    ("rm", FontStyle::Roman),
    ("mathbf", FontStyle::Bold),
    ("bf", FontStyle::Bold),
    ("textbf", FontStyle::Bold),
    ("mathcal", FontStyle::Caligraphic),
    ("cal", FontStyle::Caligraphic),
    ("mathtt", FontStyle::Typewriter),
    ("texttt", FontStyle::Typewriter),
    ("mathit", FontStyle::Italic),
    ("textit", FontStyle::Italic),
    ("mit", FontStyle::Italic),
    ("mathsf", FontStyle::SansSerif),
    ("textsf", FontStyle::SansSerif),
    ("mathfrak", FontStyle::Fraktur),
    ("frak", FontStyle::Fraktur),
    ("mathbb", FontStyle::Blackboard),
    ("mathbfit", FontStyle::BoldItalic),
    ("bm", FontStyle::BoldItalic),
    ("text", FontStyle::Roman),
];

impl Sym {
    fn to_atom(self) -> MathAtom {
        match self {
            Sym::Atom(ty, nucleus) => MathAtom::with_type(ty, nucleus),
            Sym::Op(name, limits) => MathAtom::large_operator(name, limits),
            Sym::Space(mu) => MathAtom::space(mu),
            Sym::Style(style) => MathAtom::style(style),
        }
    }

    fn nucleus(self) -> &'static str {
        match self {
            Sym::Atom(_, nucleus) | Sym::Op(nucleus, _) => nucleus,
            Sym::Space(_) | Sym::Style(_) => "",
        }
    }
}

/// Whether `candidate` should replace `existing` as the name of a symbol
fn preferred(candidate: &str, existing: &str) -> bool {
    candidate.len() < existing.len() || (candidate.len() == existing.len() && candidate < existing)
}

fn reverse_index(
    pairs: impl Iterator<Item = (&'static str, &'static str)>,
) -> HashMap<&'static str, &'static str> {
    let mut index: HashMap<&'static str, &'static str> = HashMap::new();
    for (name, value) in pairs {
        match index.get(value) {
            Some(existing) if !preferred(name, existing) => {}
            _ => {
                index.insert(value, name);
            }
        }
    }
    index
}

struct Registry {
    commands: HashMap<&'static str, Sym>,
    aliases: HashMap<&'static str, &'static str>,
    command_names: HashMap<&'static str, &'static str>,
    accents: HashMap<&'static str, &'static str>,
    accent_names: HashMap<&'static str, &'static str>,
    delimiters: HashMap<&'static str, &'static str>,
    delimiter_names: HashMap<&'static str, &'static str>,
    font_styles: HashMap<&'static str, FontStyle>,
}

impl Registry {
    fn build() -> Registry {
        let command_names = reverse_index(
            COMMANDS
                .iter()
                .map(|(name, sym)| (*name, sym.nucleus()))
                .filter(|(_, nucleus)| !nucleus.is_empty()),
        );
        Registry {
            commands: COMMANDS.iter().copied().collect(),
            aliases: ALIASES.iter().copied().collect(),
            command_names,
            accents: ACCENTS.iter().copied().collect(),
            accent_names: reverse_index(ACCENTS.iter().copied()),
            delimiters: DELIMITERS.iter().copied().collect(),
            delimiter_names: reverse_index(DELIMITERS.iter().copied()),
            font_styles: FONT_STYLES.iter().copied().collect(),
        }
    }
}

static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::build);

/// A fresh atom for a symbol command name (without backslash).
/// Aliases such as `to` or `le` are resolved.
pub fn atom_for_command(name: &str) -> Option<MathAtom> {
    let reg = &*REGISTRY;
    let name = reg.aliases.get(name).copied().unwrap_or(name);
    reg.commands.get(name).map(|sym| sym.to_atom())
}

/// The command name producing an atom with the same nucleus
pub fn latex_name_for_atom(atom: &MathAtom) -> Option<&'static str> {
    if atom.nucleus.is_empty() {
        return None;
    }
    REGISTRY.command_names.get(atom.nucleus.as_str()).copied()
}

/// All symbol command names, sorted
pub fn supported_commands() -> Vec<&'static str> {
    let mut names: Vec<_> = COMMANDS.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names
}

/// An accent atom with empty accentee
pub fn accent_named(name: &str) -> Option<MathAtom> {
    REGISTRY
        .accents
        .get(name)
        .map(|mark| MathAtom::accent(*mark, Default::default()))
}

/// The command name of an accent atom
pub fn accent_name(accent: &MathAtom) -> Option<&'static str> {
    REGISTRY.accent_names.get(accent.nucleus.as_str()).copied()
}

/// A boundary atom for a delimiter name, e.g. `(` or `langle`
pub fn boundary_atom(name: &str) -> Option<MathAtom> {
    REGISTRY
        .delimiters
        .get(name)
        .map(|delim| MathAtom::boundary(*delim))
}

/// The delimiter name of a boundary atom
pub fn delimiter_name(boundary: &MathAtom) -> Option<&'static str> {
    if boundary.atom_type() != AtomType::Boundary {
        return None;
    }
    REGISTRY
        .delimiter_names
        .get(boundary.nucleus.as_str())
        .copied()
}

/// The font style switched to by a command such as `mathbf` or `text`
pub fn font_style_named(name: &str) -> Option<FontStyle> {
    REGISTRY.font_styles.get(name).copied()
}

/// The canonical command name of a font style
pub fn font_style_name(style: FontStyle) -> &'static str {
    match style {
        FontStyle::Default => "mathnormal",
        FontStyle::Roman => "mathrm",
        FontStyle::Bold => "mathbf",
        FontStyle::Fraktur => "mathfrak",
        FontStyle::Caligraphic => "mathcal",
        FontStyle::Italic => "mathit",
        FontStyle::SansSerif => "mathsf",
        FontStyle::Blackboard => "mathbb",
        FontStyle::Typewriter => "mathtt",
        FontStyle::BoldItalic => "bm",
    }
}
