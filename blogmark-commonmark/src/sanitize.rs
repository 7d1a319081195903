//! The final sanitization pass.
//!
//! Every rendered document goes through [`sanitize_html`] before it leaves
//! the renderer. The allow-list is ammonia's default, widened for MathML, the
//! copy button, task list checkboxes and the attributes used by embeds.
use std::sync::LazyLock;

use ammonia::Builder;

/// MathML elements produced by the math extension.
const MATHML_TAGS: &[&str] = &[
  "math",
  "maction",
  "maligngroup",
  "malignmark",
  "menclose",
  "merror",
  "mfenced",
  "mfrac",
  "mglyph",
  "mi",
  "mlabeledtr",
  "mlongdiv",
  "mmultiscripts",
  "mn",
  "mo",
  "mover",
  "mpadded",
  "mphantom",
  "mprescripts",
  "mroot",
  "mrow",
  "ms",
  "mscarries",
  "mscarry",
  "msgroup",
  "msline",
  "mspace",
  "msqrt",
  "msrow",
  "mstack",
  "mstyle",
  "msub",
  "msubsup",
  "msup",
  "mtable",
  "mtd",
  "mtext",
  "mtr",
  "munder",
  "munderover",
  "none",
  "semantics",
  "annotation",
  "annotation-xml",
];

/// Presentation attributes of MathML elements.
const MATHML_ATTRIBUTES: &[&str] = &[
  "xmlns",
  "display",
  "displaystyle",
  "mathvariant",
  "mathsize",
  "mathcolor",
  "mathbackground",
  "encoding",
  "fence",
  "separator",
  "stretchy",
  "symmetric",
  "largeop",
  "movablelimits",
  "accent",
  "accentunder",
  "lspace",
  "rspace",
  "minsize",
  "maxsize",
  "form",
  "linethickness",
  "columnalign",
  "rowalign",
  "columnspan",
  "rowspan",
  "scriptlevel",
  "notation",
  "open",
  "close",
  "separators",
  "width",
  "height",
  "depth",
  "voffset",
];

/// Attributes allowed on any element.
const GENERIC_ATTRIBUTES: &[&str] = &[
  "id",
  "class",
  "style",
  "data-code",
  "allow",
  "allowfullscreen",
  "frameborder",
  "scrolling",
];

static SANITIZER: LazyLock<Builder<'static>> = LazyLock::new(|| {
  let mut builder = Builder::default();
  builder
    .add_tags(MATHML_TAGS)
    .add_tags(["button", "input"])
    .add_generic_attributes(GENERIC_ATTRIBUTES)
    .add_tag_attributes("input", ["type", "checked", "disabled"]);
  for tag in MATHML_TAGS {
    builder.add_tag_attributes(tag, MATHML_ATTRIBUTES);
  }
  builder
});

/// Strip everything capable of running script from `html`.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
  if html.is_empty() {
    return String::new();
  }
  SANITIZER.clean(html).to_string()
}
