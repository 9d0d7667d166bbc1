//! Email HTML compiler.
//!
//! Pure function from a document to one self-contained HTML string. Every
//! block renders inside a `role="presentation"` table with all styling
//! inlined on the cell: tables are the only layout primitive legacy email
//! rendering engines honor reliably, and stylesheet rules are routinely
//! stripped. Outlook's engine gets dedicated markup paths behind `mso`
//! conditional comments where the standard path would break (buttons,
//! multi-column layout).
//!
//! The compiler is lenient where the editor is strict: a child id that
//! does not resolve renders as empty output for that node, so a partial
//! document still produces a best-effort preview.

use mailsmith_document::{
    AvatarProps, AvatarShape, BlockProps, BlockStyle, ButtonProps, ColumnsProps, ContainerProps,
    DividerProps, EmailDocument, HeadingProps, HeroProps, HtmlProps, ImageProps, ListProps,
    QuoteProps, SocialLinksProps, SpacerProps, TextProps,
};
use tracing::debug;

use crate::css::{align_value, cell_style, normalize_color};

/// Fixed content width of the email body, in pixels.
pub const CONTENT_WIDTH: u32 = 600;

/// Rendering options.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// `<title>` of the produced document.
    pub title: String,
    /// Hidden preview text shown next to the subject line in inbox lists.
    pub preheader: Option<String>,
}

struct Context<'a> {
    doc: &'a EmailDocument,
    font_stack: &'static str,
    buffer: String,
}

impl Context<'_> {
    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

/// Render a document to email-client-safe HTML with default options.
pub fn render(document: &EmailDocument) -> String {
    render_with_options(document, &RenderOptions::default())
}

/// Render a document to email-client-safe HTML.
pub fn render_with_options(document: &EmailDocument, options: &RenderOptions) -> String {
    let mut ctx = Context {
        doc: document,
        font_stack: document.font_family.stack(),
        buffer: String::new(),
    };

    let backdrop = normalize_color(&document.backdrop_color);
    let canvas = normalize_color(&document.canvas_color);
    let text_color = normalize_color(&document.text_color);

    ctx.add("<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\" \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd\">\n");
    ctx.add("<html xmlns=\"http://www.w3.org/1999/xhtml\" xmlns:v=\"urn:schemas-microsoft-com:vml\" xmlns:o=\"urn:schemas-microsoft-com:office:office\">\n");
    ctx.add("<head>\n");
    ctx.add("<meta http-equiv=\"Content-Type\" content=\"text/html; charset=UTF-8\" />\n");
    ctx.add("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n");
    ctx.add("<!--[if mso]><xml><o:OfficeDocumentSettings><o:PixelsPerInch>96</o:PixelsPerInch></o:OfficeDocumentSettings></xml><![endif]-->\n");
    ctx.add(&format!("<title>{}</title>\n", escape_html(&options.title)));
    ctx.add("</head>\n");
    ctx.add(&format!(
        "<body style=\"margin:0;padding:0;background-color:{backdrop};\">\n"
    ));

    if let Some(preheader) = &options.preheader {
        ctx.add(&format!(
            "<div style=\"display:none;max-height:0;overflow:hidden;mso-hide:all;\">{}</div>\n",
            escape_html(preheader)
        ));
    }

    // Backdrop table centers the fixed-width canvas
    ctx.add(&format!(
        "<table role=\"presentation\" width=\"100%\" border=\"0\" cellpadding=\"0\" cellspacing=\"0\" bgcolor=\"{backdrop}\">\
         <tr><td align=\"center\">\n"
    ));
    ctx.add(&format!(
        "<table role=\"presentation\" width=\"{CONTENT_WIDTH}\" border=\"0\" cellpadding=\"0\" cellspacing=\"0\" bgcolor=\"{canvas}\" \
         style=\"width:{CONTENT_WIDTH}px;background-color:{canvas};color:{text_color};font-family:{font};\">\
         <tr><td>\n",
        font = ctx.font_stack
    ));

    if document.children_ids.is_empty() {
        ctx.add("&nbsp;");
    } else {
        render_children(&mut ctx, &document.children_ids);
    }

    ctx.add("</td></tr></table>\n");
    ctx.add("</td></tr></table>\n");
    ctx.add("</body>\n</html>\n");

    ctx.buffer
}

fn render_children(ctx: &mut Context, ids: &[String]) {
    for id in ids {
        render_block(ctx, id);
    }
}

fn render_block(ctx: &mut Context, id: &str) {
    // Missing references render as nothing: preview keeps working on a
    // partial document, unlike the strict gate in front of the editor
    // The document reference is independent of the output buffer, so the
    // block can be read while the buffer is written
    let doc = ctx.doc;
    let Some(block) = doc.get(id) else {
        debug!(block_id = id, "skipping unresolved block reference");
        return;
    };

    let style = &block.style;
    match &block.props {
        BlockProps::Text(props) => render_text(ctx, style, props),
        BlockProps::Heading(props) => render_heading(ctx, style, props),
        BlockProps::Image(props) => render_image(ctx, style, props),
        BlockProps::Button(props) => render_button(ctx, style, props),
        BlockProps::Divider(props) => render_divider(ctx, style, props),
        BlockProps::Spacer(props) => render_spacer(ctx, props),
        BlockProps::Columns(props) => render_columns(ctx, style, props),
        BlockProps::Container(props) => render_container(ctx, style, props),
        BlockProps::Avatar(props) => render_avatar(ctx, style, props),
        BlockProps::Html(props) => render_html(ctx, props),
        BlockProps::SocialLinks(props) => render_social_links(ctx, style, props),
        BlockProps::List(props) => render_list(ctx, style, props),
        BlockProps::Hero(props) => render_hero(ctx, style, props),
        BlockProps::Quote(props) => render_quote(ctx, style, props),
    }
}

/// `<table role="presentation"><tr><td ...>` wrapper every block lives in.
fn block_table_open(ctx: &mut Context, td_attrs: &str, td_style: &str) {
    ctx.add(
        "<table role=\"presentation\" width=\"100%\" border=\"0\" cellpadding=\"0\" cellspacing=\"0\"><tr><td",
    );
    if !td_attrs.is_empty() {
        ctx.add(" ");
        ctx.add(td_attrs);
    }
    if !td_style.is_empty() {
        ctx.add(&format!(" style=\"{}\"", td_style));
    }
    ctx.add(">");
}

fn block_table_close(ctx: &mut Context) {
    ctx.add("</td></tr></table>\n");
}

/// Empty cells collapse to zero height in some clients; a non-breaking
/// space keeps the layout.
fn text_or_placeholder(text: &str) -> String {
    if text.is_empty() {
        "&nbsp;".to_string()
    } else {
        escape_html(text)
    }
}

fn render_text(ctx: &mut Context, style: &BlockStyle, props: &TextProps) {
    let mut css = cell_style(style);
    css.push("font-family", ctx.font_stack);
    css.push("line-height", "1.5");
    block_table_open(ctx, "", &css.finish());
    ctx.add(&text_or_placeholder(&props.text));
    block_table_close(ctx);
}

fn render_heading(ctx: &mut Context, style: &BlockStyle, props: &HeadingProps) {
    let mut css = cell_style(style);
    css.push("font-family", ctx.font_stack);
    block_table_open(ctx, "", &css.finish());
    let tag = props.level.tag();
    ctx.add(&format!(
        "<{tag} style=\"margin:0;font-size:inherit;font-weight:inherit;\">{}</{tag}>",
        text_or_placeholder(&props.text)
    ));
    block_table_close(ctx);
}

fn render_image(ctx: &mut Context, style: &BlockStyle, props: &ImageProps) {
    let align = style.text_align.map(align_value).unwrap_or("center");
    let css = cell_style(style);
    block_table_open(ctx, &format!("align=\"{align}\""), &css.finish());
    if props.src.is_empty() {
        ctx.add("&nbsp;");
    } else {
        let width_attr = props
            .width
            .map(|w| format!(" width=\"{w}\""))
            .unwrap_or_default();
        ctx.add(&format!(
            "<img src=\"{}\" alt=\"{}\"{width_attr} style=\"display:block;border:0;max-width:100%;height:auto;\" />",
            escape_html(&props.src),
            escape_html(&props.alt)
        ));
    }
    block_table_close(ctx);
}

fn render_button(ctx: &mut Context, style: &BlockStyle, props: &ButtonProps) {
    let fill = normalize_color(&props.color);
    let text_color = normalize_color(&props.text_color);
    let url = escape_html(&props.url);
    let label = text_or_placeholder(&props.text);
    let align = style.text_align.map(align_value).unwrap_or("center");
    let font = ctx.font_stack;

    let css = cell_style(style);
    block_table_open(ctx, &format!("align=\"{align}\""), &css.finish());

    // Outlook ignores padding and border-radius on anchors; a VML
    // roundrect with explicit stroke and fill is the only reliable shape
    ctx.add(&format!(
        "<!--[if mso]>\
         <v:roundrect xmlns:v=\"urn:schemas-microsoft-com:vml\" xmlns:w=\"urn:schemas-microsoft-com:office:word\" \
         href=\"{url}\" style=\"height:44px;v-text-anchor:middle;width:220px;\" arcsize=\"14%\" \
         strokecolor=\"{fill}\" fillcolor=\"{fill}\">\
         <w:anchorlock/>\
         <center style=\"color:{text_color};font-family:{font};font-size:16px;font-weight:bold;\">{label}</center>\
         </v:roundrect>\
         <![endif]-->"
    ));
    ctx.add(&format!(
        "<!--[if !mso]><!-->\
         <a href=\"{url}\" style=\"display:inline-block;background-color:{fill};color:{text_color};\
         font-family:{font};font-size:16px;font-weight:bold;text-decoration:none;\
         padding:12px 32px;border-radius:6px;\">{label}</a>\
         <!--<![endif]-->"
    ));

    block_table_close(ctx);
}

fn render_divider(ctx: &mut Context, style: &BlockStyle, props: &DividerProps) {
    let color = normalize_color(&props.color);
    let css = cell_style(style);
    block_table_open(ctx, "", &css.finish());
    ctx.add(&format!(
        "<table role=\"presentation\" width=\"100%\" border=\"0\" cellpadding=\"0\" cellspacing=\"0\">\
         <tr><td style=\"border-top:{}px solid {color};font-size:0;line-height:0;\">&nbsp;</td></tr></table>",
        props.thickness
    ));
    block_table_close(ctx);
}

fn render_spacer(ctx: &mut Context, props: &SpacerProps) {
    let height = props.height;
    ctx.add(&format!(
        "<table role=\"presentation\" width=\"100%\" border=\"0\" cellpadding=\"0\" cellspacing=\"0\">\
         <tr><td height=\"{height}\" style=\"height:{height}px;font-size:0;line-height:0;\">&nbsp;</td></tr></table>\n"
    ));
}

fn render_columns(ctx: &mut Context, style: &BlockStyle, props: &ColumnsProps) {
    let count = props.columns.len().max(1);
    let percent = 100 / count;
    let column_width = CONTENT_WIDTH as usize / count;

    let css = cell_style(style);
    block_table_open(ctx, "", &css.finish());

    // Outlook needs a real table row; everywhere else inline-block divs
    // stack gracefully on narrow viewports
    ctx.add("<!--[if mso]><table role=\"presentation\" width=\"100%\" border=\"0\" cellpadding=\"0\" cellspacing=\"0\"><tr><![endif]-->");
    for column in &props.columns {
        ctx.add(&format!(
            "<!--[if mso]><td width=\"{percent}%\" valign=\"top\"><![endif]-->"
        ));
        ctx.add(&format!(
            "<div style=\"display:inline-block;width:100%;max-width:{column_width}px;vertical-align:top;\">"
        ));
        if column.children_ids.is_empty() {
            ctx.add("&nbsp;");
        } else {
            render_children(ctx, &column.children_ids);
        }
        ctx.add("</div>");
        ctx.add("<!--[if mso]></td><![endif]-->");
    }
    ctx.add("<!--[if mso]></tr></table><![endif]-->");

    block_table_close(ctx);
}

fn render_container(ctx: &mut Context, style: &BlockStyle, props: &ContainerProps) {
    // Some clients honor only the legacy bgcolor attribute, so the
    // background is emitted twice
    let attrs = style
        .background_color
        .as_deref()
        .map(|color| format!("bgcolor=\"{}\"", normalize_color(color)))
        .unwrap_or_default();
    let css = cell_style(style);

    block_table_open(ctx, &attrs, &css.finish());
    if props.children_ids.is_empty() {
        ctx.add("&nbsp;");
    } else {
        render_children(ctx, &props.children_ids);
    }
    block_table_close(ctx);
}

fn render_avatar(ctx: &mut Context, style: &BlockStyle, props: &AvatarProps) {
    let align = style.text_align.map(align_value).unwrap_or("center");
    let css = cell_style(style);
    block_table_open(ctx, &format!("align=\"{align}\""), &css.finish());
    if props.src.is_empty() {
        ctx.add("&nbsp;");
    } else {
        let size = props.size;
        let shape = match props.shape {
            AvatarShape::Circle => "border-radius:50%;",
            AvatarShape::Square => "",
        };
        ctx.add(&format!(
            "<img src=\"{}\" alt=\"{}\" width=\"{size}\" height=\"{size}\" \
             style=\"display:inline-block;border:0;{shape}\" />",
            escape_html(&props.src),
            escape_html(&props.alt)
        ));
    }
    block_table_close(ctx);
}

fn render_html(ctx: &mut Context, props: &HtmlProps) {
    // Verbatim passthrough: the variant exists as an escape hatch for
    // hand-authored markup
    if props.html.is_empty() {
        block_table_open(ctx, "", "");
        ctx.add("&nbsp;");
        block_table_close(ctx);
    } else {
        ctx.add(&props.html);
        ctx.add("\n");
    }
}

fn render_social_links(ctx: &mut Context, style: &BlockStyle, props: &SocialLinksProps) {
    let color = normalize_color(style.color.as_deref().unwrap_or(&ctx.doc.text_color));
    let font = ctx.font_stack;
    let mut css = cell_style(style);
    css.push("font-family", font);
    block_table_open(ctx, "", &css.finish());
    if props.links.is_empty() {
        ctx.add("&nbsp;");
    } else {
        for link in &props.links {
            ctx.add(&format!(
                "<a href=\"{}\" style=\"display:inline-block;padding:0 8px;color:{color};text-decoration:underline;\">{}</a>",
                escape_html(&link.url),
                text_or_placeholder(&link.label)
            ));
        }
    }
    block_table_close(ctx);
}

fn render_list(ctx: &mut Context, style: &BlockStyle, props: &ListProps) {
    let mut css = cell_style(style);
    css.push("font-family", ctx.font_stack);
    css.push("line-height", "1.5");
    block_table_open(ctx, "", &css.finish());
    if props.items.is_empty() {
        ctx.add("&nbsp;");
    } else {
        let tag = if props.ordered { "ol" } else { "ul" };
        ctx.add(&format!("<{tag} style=\"margin:0;padding-left:24px;\">"));
        for item in &props.items {
            ctx.add(&format!("<li>{}</li>", escape_html(item)));
        }
        ctx.add(&format!("</{tag}>"));
    }
    block_table_close(ctx);
}

fn render_hero(ctx: &mut Context, style: &BlockStyle, props: &HeroProps) {
    // The one sanctioned deviation from pure table layout: a layered
    // background with a semi-transparent overlay. Decorative, not
    // structural, so clients that drop the layering still show the text.
    let overlay = normalize_color(&props.overlay_color);
    let opacity = props.overlay_opacity.clamp(0.0, 1.0);
    let font = ctx.font_stack;

    let css = cell_style(style);
    block_table_open(ctx, "", &css.finish());
    ctx.add(&format!(
        "<div style=\"position:relative;background-image:url('{}');background-size:cover;background-position:center;\">",
        escape_html(&props.image_url)
    ));
    ctx.add(&format!(
        "<div style=\"position:absolute;top:0;left:0;width:100%;height:100%;background-color:{overlay};opacity:{opacity};\"></div>"
    ));
    ctx.add("<div style=\"position:relative;padding:48px 32px;text-align:center;\">");
    if props.title.is_empty() && props.subtitle.is_empty() {
        ctx.add("&nbsp;");
    } else {
        if !props.title.is_empty() {
            ctx.add(&format!(
                "<h1 style=\"margin:0;color:#FFFFFF;font-family:{font};font-size:32px;\">{}</h1>",
                escape_html(&props.title)
            ));
        }
        if !props.subtitle.is_empty() {
            ctx.add(&format!(
                "<p style=\"margin:8px 0 0;color:#FFFFFF;font-family:{font};font-size:18px;\">{}</p>",
                escape_html(&props.subtitle)
            ));
        }
    }
    ctx.add("</div></div>");
    block_table_close(ctx);
}

fn render_quote(ctx: &mut Context, style: &BlockStyle, props: &QuoteProps) {
    let mut css = cell_style(style);
    css.push("font-family", ctx.font_stack);
    block_table_open(ctx, "", &css.finish());
    ctx.add(
        "<table role=\"presentation\" width=\"100%\" border=\"0\" cellpadding=\"0\" cellspacing=\"0\">\
         <tr><td style=\"border-left:4px solid #E2E2E2;padding:8px 16px;font-style:italic;line-height:1.5;\">",
    );
    ctx.add(&text_or_placeholder(&props.text));
    if !props.attribution.is_empty() {
        ctx.add(&format!(
            "<br /><span style=\"font-style:normal;font-size:14px;\">&mdash; {}</span>",
            escape_html(&props.attribution)
        ));
    }
    ctx.add("</td></tr></table>");
    block_table_close(ctx);
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
