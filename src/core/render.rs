use crate::domain::model::AggregatedProduct;

/// Escape text for safe interpolation into HTML content or quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render one product card fragment.
///
/// The image element, color, sizes and retail-price lines appear only when
/// the corresponding value is present; the remaining lines always render.
pub fn render_card(
    product: &AggregatedProduct,
    image_ref: Option<&str>,
    color_name: Option<&str>,
    retail_price: Option<f64>,
) -> String {
    let mut card = String::new();
    card.push_str("<div class=\"product-card\">\n");

    if let Some(src) = image_ref {
        card.push_str(&format!(
            "<img src='{}' alt='Product Image' />\n",
            escape_html(src)
        ));
    }

    card.push_str(&format!("<p>{}</p>\n", escape_html(&product.item_model)));
    card.push_str(&format!(
        "<p>{} - {}</p>\n",
        product.key.item_code(),
        product.key.color_suffix()
    ));

    if let Some(color) = color_name {
        card.push_str(&format!("<p>Color: {}</p>\n", escape_html(color)));
    }
    if !product.sizes.is_empty() && !product.sizes.eq_ignore_ascii_case("unknown") {
        card.push_str(&format!(
            "<p>Sizes Available: {}</p>\n",
            escape_html(&product.sizes)
        ));
    }
    if let Some(retail) = retail_price {
        card.push_str(&format!("<p>Retail Price: {:.2}</p>\n", retail));
    }

    card.push_str(&format!(
        "<p>Outlet Price: {}</p>\n",
        escape_html(&product.outlet_full_price)
    ));
    card.push_str(&format!("<p>- {}</p>\n", escape_html(&product.discount)));
    card.push_str(&format!(
        "<p>Sale Price: {}</p>\n",
        escape_html(&product.final_outlet_price)
    ));
    card.push_str("</div>");

    card
}

/// Wrap rendered card fragments in the static page shell. The grid packs as
/// many `min_card_width`-wide columns as fit. Nothing time-dependent goes in
/// here: rerunning over unchanged inputs must produce identical bytes.
pub fn render_page(cards: &[String], min_card_width: u32) -> String {
    let mut page = String::new();
    page.push_str("<html><head><style>");
    page.push_str(&format!(
        ".product-grid {{ display: grid; grid-template-columns: repeat(auto-fill, minmax({}px, 1fr)); gap: 16px; }} ",
        min_card_width
    ));
    page.push_str(
        ".product-card { border: 1px solid #ccc; padding: 16px; text-align: left; \
         padding-left: 20px; font-family: 'Arial', sans-serif; font-size: 12px; line-height: 1.6; } ",
    );
    page.push_str(".product-card img { max-width: 100%; height: auto; margin-bottom: 10px; }");
    page.push_str("</style></head><body>");
    page.push_str("<div class='product-grid'>");
    page.push_str(&cards.join("\n"));
    page.push_str("</div></body></html>");
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ItemColorKey;

    fn product(sizes: &str) -> AggregatedProduct {
        AggregatedProduct {
            key: ItemColorKey::parse("AB12345678RED").unwrap(),
            item_model: "Jacket".to_string(),
            outlet_full_price: "100".to_string(),
            discount: "20%".to_string(),
            final_outlet_price: "80".to_string(),
            sizes: sizes.to_string(),
        }
    }

    #[test]
    fn full_card_renders_every_line() {
        let card = render_card(
            &product("M, S"),
            Some("https://cdn.example.com/AB12345678RED.jpg"),
            Some("Crimson"),
            Some(150.0),
        );

        assert!(card.contains("<img src='https://cdn.example.com/AB12345678RED.jpg'"));
        assert!(card.contains("<p>Jacket</p>"));
        assert!(card.contains("<p>AB12345678 - RED</p>"));
        assert!(card.contains("<p>Color: Crimson</p>"));
        assert!(card.contains("<p>Sizes Available: M, S</p>"));
        assert!(card.contains("<p>Retail Price: 150.00</p>"));
        assert!(card.contains("<p>Outlet Price: 100</p>"));
        assert!(card.contains("<p>- 20%</p>"));
        assert!(card.contains("<p>Sale Price: 80</p>"));
    }

    #[test]
    fn optional_lines_are_omitted_when_absent() {
        let card = render_card(&product(""), None, None, None);

        assert!(!card.contains("<img"));
        assert!(!card.contains("Color:"));
        assert!(!card.contains("Sizes Available:"));
        assert!(!card.contains("Retail Price:"));
        assert!(card.contains("<p>Outlet Price: 100</p>"));
    }

    #[test]
    fn unknown_sizes_are_treated_as_absent() {
        let card = render_card(&product("Unknown"), None, None, None);
        assert!(!card.contains("Sizes Available:"));
    }

    #[test]
    fn text_is_escaped() {
        let mut p = product("S");
        p.item_model = "Coat <limited> & rare".to_string();
        let card = render_card(&p, None, None, None);
        assert!(card.contains("<p>Coat &lt;limited&gt; &amp; rare</p>"));
    }

    #[test]
    fn page_embeds_grid_css_and_cards() {
        let cards = vec!["<div class=\"product-card\"></div>".to_string()];
        let page = render_page(&cards, 240);

        assert!(page.starts_with("<html><head><style>"));
        assert!(page.contains("minmax(240px, 1fr)"));
        assert!(page.contains("<div class='product-grid'>"));
        assert!(page.ends_with("</div></body></html>"));
    }
}
