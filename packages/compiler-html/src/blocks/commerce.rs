use super::{or, placeholder, text};
use crate::compiler::RenderContext;
use crate::embeds::format_price;
use crate::html::{Attrs, Context};
use pagecraft_compiler_css::Declarations;
use pagecraft_model::settings::{
    CustomHtmlSettings, FaqSettings, FeaturedProductsSettings, RepeaterSettings,
    TestimonialsSettings,
};
use pagecraft_model::Product;

fn grid(columns: u32) -> Declarations {
    let mut style = Declarations::new();
    style
        .push("display", "grid")
        .push(
            "grid-template-columns",
            format!("repeat({}, minmax(0, 1fr))", columns.clamp(1, 6)),
        )
        .push("gap", "24px");
    style
}

pub(crate) fn repeater(s: &RepeaterSettings, out: &mut Context) {
    let items = s.items.as_deref().unwrap_or_default();
    if items.is_empty() {
        return;
    }

    let style = if or(&s.layout, "grid") == "carousel" {
        let mut style = Declarations::new();
        style
            .push("display", "flex")
            .push("gap", "24px")
            .push("overflow-x", "auto")
            .push("scroll-snap-type", "x mandatory");
        style
    } else {
        grid(s.columns.unwrap_or(3))
    };

    out.open("div", &Attrs::new().set("class", "pc-repeater").style(&style));
    for item in items {
        out.open("div", &Attrs::new().set("class", "pc-repeater-item"));
        if let Some(src) = text(&item.image_url) {
            out.empty("img", &Attrs::new().set("src", src).set("alt", item.title.as_str()).set("loading", "lazy"));
        }
        out.element("h3", &Attrs::new(), &item.title);
        if let Some(description) = text(&item.description) {
            out.element("p", &Attrs::new(), description);
        }
        if let Some(label) = text(&item.button_text) {
            out.element(
                "a",
                &Attrs::new()
                    .set("class", "pc-button")
                    .set("href", or(&item.button_link, "#")),
                label,
            );
        }
        out.close("div");
    }
    out.close("div");
}

pub(crate) fn faq(s: &FaqSettings, out: &mut Context) {
    out.open("div", &Attrs::new().set("class", "pc-faq"));
    out.element("h2", &Attrs::new(), or(&s.title, "Frequently Asked Questions"));
    for item in s.faq_items.iter().flatten() {
        out.open("details", &Attrs::new().set("class", "pc-faq-item"));
        out.element("summary", &Attrs::new(), &item.question);
        out.element("p", &Attrs::new(), &item.answer);
        out.close("details");
    }
    out.close("div");
}

pub(crate) fn testimonials(s: &TestimonialsSettings, out: &mut Context) {
    out.open("div", &Attrs::new().set("class", "pc-testimonials"));
    out.element("h2", &Attrs::new(), or(&s.title, "What Our Customers Say"));
    out.open("div", &Attrs::new().style(&grid(3)));
    for testimonial in s.testimonials.iter().flatten() {
        out.open("figure", &Attrs::new().set("class", "pc-testimonial"));
        out.element("blockquote", &Attrs::new(), &testimonial.quote);
        out.open("figcaption", &Attrs::new());
        out.element("strong", &Attrs::new(), &testimonial.author);
        if let Some(title) = text(&testimonial.title) {
            out.element("cite", &Attrs::new(), title);
        }
        out.close("figcaption");
        out.close("figure");
    }
    out.close("div");
    out.close("div");
}

/// Products in the order their ids were picked; ids with no product are skipped
pub(crate) fn pick_products<'a>(ids: &[String], catalog: &'a [Product]) -> Vec<&'a Product> {
    ids.iter()
        .filter_map(|id| catalog.iter().find(|p| &p.id == id))
        .collect()
}

pub(crate) fn featured_products(
    s: &FeaturedProductsSettings,
    ctx: &RenderContext,
    out: &mut Context,
) {
    let ids = s.product_ids.as_deref().unwrap_or_default();
    let products = pick_products(ids, ctx.products);

    out.open("div", &Attrs::new().set("class", "pc-featured-products"));
    out.element("h2", &Attrs::new(), or(&s.title, "Featured Products"));
    if let Some(subtitle) = text(&s.subtitle) {
        out.element("p", &Attrs::new().set("class", "pc-subtitle"), subtitle);
    }

    if products.is_empty() {
        placeholder(ctx.editable, "Select products to feature", out);
    } else {
        out.open("div", &Attrs::new().set("class", "pc-product-grid").style(&grid(s.columns.unwrap_or(3))));
        for product in products {
            let href = format!("/shop/{}/product/{}", ctx.shop_slug, product.id);
            out.open("a", &Attrs::new().set("class", "pc-product-card").set("href", href));
            if let Some(src) = text(&product.image_url) {
                out.empty(
                    "img",
                    &Attrs::new()
                        .set("src", src)
                        .set("alt", product.name.as_str())
                        .set("loading", "lazy"),
                );
            }
            out.element("h3", &Attrs::new().set("class", "pc-product-name"), &product.name);
            out.element(
                "p",
                &Attrs::new().set("class", "pc-product-price"),
                &format_price(product.price),
            );
            out.close("a");
        }
        out.close("div");
    }

    if s.show_view_all_button.unwrap_or(false) {
        out.element(
            "a",
            &Attrs::new()
                .set("class", "pc-button")
                .set("href", format!("/shop/{}/products", ctx.shop_slug)),
            "View All Products",
        );
    }
    out.close("div");
}

/// Author HTML, written as-is
pub(crate) fn custom_html(s: &CustomHtmlSettings, out: &mut Context) {
    out.raw(or(&s.html, ""));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: id.to_uppercase(),
            price: 1.0,
            image_url: None,
            description: None,
        }
    }

    #[test]
    fn test_pick_products_keeps_selection_order() {
        let catalog = vec![product("a"), product("b"), product("c")];
        let ids = vec!["c".to_string(), "missing".to_string(), "a".to_string()];
        let picked: Vec<_> = pick_products(&ids, &catalog).into_iter().map(|p| p.id.as_str()).collect();
        assert_eq!(picked, vec!["c", "a"]);
    }

    #[test]
    fn test_grid_columns_are_bounded() {
        assert!(grid(0).to_inline().contains("repeat(1, "));
        assert!(grid(12).to_inline().contains("repeat(6, "));
    }
}
