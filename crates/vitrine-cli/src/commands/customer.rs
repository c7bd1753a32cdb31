// Show a customer and their products

use vitrine_http::Customer;

use super::{print_json, Command};
use crate::app::AppContext;
use crate::error::CliResult;
use crate::output::OutputStyle;

pub struct CustomerCommand<'a> {
    context: &'a AppContext,
    id: String,
    json: bool,
}

impl<'a> CustomerCommand<'a> {
    pub fn new(context: &'a AppContext, id: String, json: bool) -> Self {
        Self { context, id, json }
    }

    pub fn render(style: &OutputStyle, customer: &Customer) -> String {
        let mut lines = vec![style.header(&format!(
            "Customer {} ({})",
            customer.full_name(),
            customer.customer_id
        ))];
        if customer.products.is_empty() {
            lines.push(style.dim("  no products"));
        }
        for (index, product) in customer.products.iter().enumerate() {
            lines.push(format!(
                "  {}. #{} {}",
                index + 1,
                product.product_id,
                product.name
            ));
        }
        lines.join("\n")
    }
}

#[async_trait::async_trait]
impl Command for CustomerCommand<'_> {
    async fn execute(&self) -> CliResult<()> {
        let customer = self.context.catalog.customer(&self.id).await?;
        if self.json {
            return print_json(&customer);
        }
        println!("{}", Self::render(&OutputStyle::default(), &customer));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_http::ProductSummary;

    #[test]
    fn test_render_lists_products() {
        let customer = Customer {
            customer_id: "C-42".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Ruiz".to_string(),
            products: vec![ProductSummary {
                product_id: 3,
                name: "Work Gloves".to_string(),
                category: None,
                image_url: None,
            }],
        };
        let text = CustomerCommand::render(&OutputStyle { use_colors: false }, &customer);

        assert_eq!(text, "Customer Ana Ruiz (C-42)\n  1. #3 Work Gloves");
    }
}
