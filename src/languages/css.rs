//! 既定の CSS 語彙
//!
//! CSS のプロパティ名、キーワード値、色名の代表的な部分集合。
//! 完全なデータが必要なら独自の [`Vocabulary`] を渡す。

use once_cell::sync::Lazy;
use std::collections::HashSet;

use super::Vocabulary;

static ATTRIBUTES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "align-content", "align-items", "align-self", "animation", "animation-delay",
        "animation-duration", "animation-name", "background", "background-attachment",
        "background-color", "background-image", "background-position", "background-repeat",
        "background-size", "border", "border-bottom", "border-collapse", "border-color",
        "border-left", "border-radius", "border-right", "border-spacing", "border-style",
        "border-top", "border-width", "bottom", "box-shadow", "box-sizing", "clear", "clip",
        "color", "columns", "content", "counter-increment", "counter-reset", "cursor",
        "direction", "display", "empty-cells", "filter", "flex", "flex-basis",
        "flex-direction", "flex-flow", "flex-grow", "flex-shrink", "flex-wrap", "float",
        "font", "font-family", "font-size", "font-style", "font-variant", "font-weight",
        "gap", "grid", "grid-area", "grid-column", "grid-row", "grid-template", "height",
        "justify-content", "left", "letter-spacing", "line-height", "list-style",
        "list-style-image", "list-style-position", "list-style-type", "margin",
        "margin-bottom", "margin-left", "margin-right", "margin-top", "max-height",
        "max-width", "min-height", "min-width", "opacity", "order", "outline",
        "outline-color", "outline-style", "outline-width", "overflow", "overflow-x",
        "overflow-y", "padding", "padding-bottom", "padding-left", "padding-right",
        "padding-top", "page-break-after", "page-break-before", "position", "quotes",
        "resize", "right", "table-layout", "text-align", "text-decoration", "text-indent",
        "text-overflow", "text-shadow", "text-transform", "top", "transform",
        "transition", "unicode-bidi", "vertical-align", "visibility", "white-space",
        "width", "word-break", "word-spacing", "word-wrap", "z-index",
    ]
    .into_iter()
    .collect()
});

static BUILTINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "above", "absolute", "always", "auto", "avoid", "baseline", "below", "bidi-override",
        "block", "bold", "bolder", "border-box", "both", "bottom", "break-all", "break-word",
        "capitalize", "center", "circle", "collapse", "column", "content-box", "crosshair",
        "dashed", "decimal", "default", "disc", "dotted", "double", "ellipsis", "embed",
        "fixed", "flex", "flex-end", "flex-start", "grid", "groove", "hidden", "inherit",
        "initial", "inline", "inline-block", "inline-flex", "inset", "italic", "justify",
        "left", "lighter", "line-through", "lowercase", "ltr", "medium", "middle",
        "no-repeat", "none", "normal", "nowrap", "oblique", "outset", "overline", "pointer",
        "pre", "pre-line", "pre-wrap", "relative", "repeat", "repeat-x", "repeat-y", "ridge",
        "right", "row", "rtl", "scroll", "separate", "small", "small-caps", "solid",
        "space-around", "space-between", "square", "static", "sticky", "stretch", "table",
        "table-cell", "table-row", "text", "text-bottom", "text-top", "thick", "thin", "top",
        "transparent", "underline", "unset", "uppercase", "visible", "wait", "wrap",
        "x-large", "x-small", "xx-large", "xx-small",
    ]
    .into_iter()
    .collect()
});

static CONSTANTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque",
        "black", "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue",
        "chartreuse", "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan",
        "darkblue", "darkcyan", "darkgray", "darkgreen", "darkred", "deeppink", "dimgray",
        "firebrick", "forestgreen", "fuchsia", "gainsboro", "gold", "goldenrod", "gray",
        "green", "greenyellow", "honeydew", "hotpink", "indianred", "indigo", "ivory",
        "khaki", "lavender", "lawngreen", "lemonchiffon", "lightblue", "lightgray",
        "lightgreen", "lime", "limegreen", "linen", "magenta", "maroon", "navy", "olive",
        "orange", "orangered", "orchid", "pink", "plum", "purple", "red", "rosybrown",
        "royalblue", "salmon", "sandybrown", "seagreen", "sienna", "silver", "skyblue",
        "slateblue", "slategray", "snow", "springgreen", "steelblue", "tan", "teal",
        "thistle", "tomato", "turquoise", "violet", "wheat", "white", "whitesmoke",
        "yellow", "yellowgreen",
    ]
    .into_iter()
    .collect()
});

/// 組み込みの CSS 単語リスト
#[derive(Debug, Clone, Copy, Default)]
pub struct CssVocabulary;

impl Vocabulary for CssVocabulary {
    fn is_builtin(&self, word: &str) -> bool {
        BUILTINS.contains(word)
    }

    fn is_constant(&self, word: &str) -> bool {
        CONSTANTS.contains(word)
    }

    fn is_attribute(&self, word: &str) -> bool {
        ATTRIBUTES.contains(word)
    }
}
