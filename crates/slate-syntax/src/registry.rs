// Static language definitions: ordered rule tables, built once per process.

use std::sync::OnceLock;

use regex::Regex;
use slate_core::{LanguageId, TokenKind};

// ──────────────────────────────────────────────
// Rule types
// ──────────────────────────────────────────────

/// A token rule confined to one line. If the pattern contains a capture
/// group, the emitted span covers group 1 instead of the whole match
/// (the `regex` crate has no look-ahead, so e.g. the function-call rule
/// matches the trailing `(` but only styles the identifier).
pub struct SingleLineRule {
    pub kind: TokenKind,
    pub pattern: Regex,
}

/// A region rule whose start and end delimiters may sit on different
/// lines. The rule's index in `LanguageDefinition::regions` is its bit
/// position in the carried line state.
pub struct MultiLineRule {
    pub kind: TokenKind,
    pub start: Regex,
    pub end: Regex,
}

/// Ordered rule tables for one language. Earlier rules win overlaps.
pub struct LanguageDefinition {
    pub name: &'static str,
    pub rules: Vec<SingleLineRule>,
    pub regions: Vec<MultiLineRule>,
}

// ──────────────────────────────────────────────
// Registry
// ──────────────────────────────────────────────

pub struct Registry {
    python: LanguageDefinition,
    javascript: LanguageDefinition,
    html: LanguageDefinition,
    css: LanguageDefinition,
}

impl Registry {
    /// The process-wide registry, built on first use and immutable after.
    pub fn global() -> &'static Registry {
        static REGISTRY: OnceLock<Registry> = OnceLock::new();
        REGISTRY.get_or_init(Registry::build)
    }

    pub fn get(&self, id: LanguageId) -> &LanguageDefinition {
        match id {
            LanguageId::Python => &self.python,
            LanguageId::Javascript => &self.javascript,
            LanguageId::Html => &self.html,
            LanguageId::Css => &self.css,
        }
    }

    fn build() -> Self {
        let registry = Self {
            python: python_definition(),
            javascript: javascript_definition(),
            html: html_definition(),
            css: css_definition(),
        };
        for id in [
            LanguageId::Python,
            LanguageId::Javascript,
            LanguageId::Html,
            LanguageId::Css,
        ] {
            // Region index doubles as a bit position in the carried state.
            debug_assert!(registry.get(id).regions.len() <= 32);
        }
        registry
    }
}

// Patterns below are fixed literals; compilation cannot fail at runtime,
// so `expect` is acceptable here (and nowhere else outside tests).
fn rule(kind: TokenKind, pattern: &str) -> SingleLineRule {
    SingleLineRule {
        kind,
        pattern: Regex::new(pattern).expect("invalid single-line rule pattern"),
    }
}

fn region(kind: TokenKind, start: &str, end: &str) -> MultiLineRule {
    MultiLineRule {
        kind,
        start: Regex::new(start).expect("invalid region start pattern"),
        end: Regex::new(end).expect("invalid region end pattern"),
    }
}

// ──────────────────────────────────────────────
// Language tables
// ──────────────────────────────────────────────

fn python_definition() -> LanguageDefinition {
    let keywords = concat!(
        r"\b(?:False|None|True|and|as|assert|async|await|break|class|continue|",
        r"def|del|elif|else|except|finally|for|from|global|if|import|in|is|",
        r"lambda|nonlocal|not|or|pass|raise|return|try|while|with|yield)\b",
    );
    let builtins = concat!(
        r"\b(?:print|len|range|int|str|float|list|dict|set|tuple|bool|",
        r"type|isinstance|hasattr|getattr|setattr|open|super|property|",
        r"staticmethod|classmethod|enumerate|zip|map|filter|sorted|reversed|",
        r"abs|min|max|sum|any|all|input|id|repr|hex|oct|bin|chr|ord)\b",
    );
    let types =
        r"\b(?:int|str|float|bool|list|dict|set|tuple|bytes|bytearray|complex|frozenset|object)\b";

    LanguageDefinition {
        name: "python",
        rules: vec![
            rule(TokenKind::Comment, r"#.*"),
            rule(TokenKind::String, r#"(?:"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*')"#),
            rule(TokenKind::Decorator, r"@\w+(?:\.\w+)*"),
            rule(TokenKind::Keyword, keywords),
            rule(TokenKind::Type, types),
            rule(TokenKind::Builtin, builtins),
            rule(TokenKind::Function, r"\b(\w+)\s*\("),
            rule(
                TokenKind::Number,
                r"\b(?:0[xXoObB][\da-fA-F_]+|\d[\d_]*(?:\.[\d_]+)?(?:[eE][+-]?\d+)?)\b",
            ),
            rule(TokenKind::Operator, r"[+\-*/%=<>!&|^~]+"),
        ],
        regions: vec![
            region(TokenKind::String, r#"""""#, r#"""""#),
            region(TokenKind::String, r"'''", r"'''"),
        ],
    }
}

fn javascript_definition() -> LanguageDefinition {
    let keywords = concat!(
        r"\b(?:break|case|catch|class|const|continue|debugger|default|delete|",
        r"do|else|export|extends|finally|for|function|if|import|in|instanceof|",
        r"let|new|of|return|super|switch|this|throw|try|typeof|var|void|while|",
        r"with|yield|async|await|from|static|get|set)\b",
    );
    let builtins = concat!(
        r"\b(?:console|document|window|Array|Object|String|Number|Boolean|",
        r"Math|JSON|Promise|Date|RegExp|Error|Map|Set|Symbol|parseInt|",
        r"parseFloat|isNaN|isFinite|undefined|null|NaN|Infinity)\b",
    );
    let types = r"\b(?:string|number|boolean|object|symbol|bigint|undefined|null|void|never|any)\b";

    LanguageDefinition {
        name: "javascript",
        rules: vec![
            rule(TokenKind::Comment, r"//.*"),
            rule(
                TokenKind::String,
                r#"(?:"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'|`(?:[^`\\]|\\.)*`)"#,
            ),
            rule(TokenKind::Keyword, keywords),
            rule(TokenKind::Type, types),
            rule(TokenKind::Builtin, builtins),
            rule(TokenKind::Function, r"\b(\w+)\s*\("),
            rule(
                TokenKind::Number,
                r"\b(?:0[xXoObB][\da-fA-F_]+|\d[\d_]*(?:\.[\d_]+)?(?:[eE][+-]?\d+)?)\b",
            ),
            rule(TokenKind::Operator, r"[+\-*/%=<>!&|^~?:]+"),
        ],
        regions: vec![region(TokenKind::Comment, r"/\*", r"\*/")],
    }
}

fn html_definition() -> LanguageDefinition {
    LanguageDefinition {
        name: "html",
        rules: vec![
            rule(TokenKind::Comment, r"<!--.*?-->"),
            rule(TokenKind::String, r#"(?:"[^"]*"|'[^']*')"#),
            // Tags and closing angle brackets share the decorator style.
            rule(TokenKind::Decorator, r"</?[\w-]+"),
            rule(TokenKind::Decorator, r"/?>"),
            rule(
                TokenKind::Keyword,
                r"\b(?:class|id|href|src|style|type|name|value|alt|title|rel|lang|charset|content|http-equiv)\b",
            ),
            rule(TokenKind::Builtin, r"&\w+;"),
        ],
        regions: vec![region(TokenKind::Comment, r"<!--", r"-->")],
    }
}

fn css_definition() -> LanguageDefinition {
    let keywords = concat!(
        r"\b(?:important|inherit|initial|unset|none|auto|block|inline|flex|grid|",
        r"absolute|relative|fixed|sticky|solid|dashed|dotted|hidden|visible|",
        r"normal|bold|italic|center|left|right|top|bottom)\b",
    );
    let builtins = concat!(
        r"\b(?:color|background|margin|padding|border|font|display|position|",
        r"width|height|max-width|min-width|max-height|min-height|overflow|",
        r"text-align|text-decoration|line-height|opacity|z-index|transition|",
        r"transform|animation|box-shadow|cursor|content|float|clear)\b",
    );

    LanguageDefinition {
        name: "css",
        rules: vec![
            rule(TokenKind::Comment, r"/\*.*?\*/"),
            rule(TokenKind::String, r#"(?:"[^"]*"|'[^']*')"#),
            rule(TokenKind::Decorator, r"[.#][\w-]+"),
            rule(TokenKind::Keyword, keywords),
            rule(TokenKind::Builtin, builtins),
            rule(
                TokenKind::Number,
                r"\b\d+(?:\.\d+)?(?:px|em|rem|%|vh|vw|s|ms|deg|fr)?\b",
            ),
            rule(TokenKind::Function, r"\b(\w+)\s*\("),
            rule(TokenKind::Operator, r"[{}:;,>+~]"),
        ],
        regions: vec![region(TokenKind::Comment, r"/\*", r"\*/")],
    }
}
