// Show one product

use super::{print_json, Command};
use crate::app::AppContext;
use crate::error::CliResult;
use crate::output::OutputStyle;

pub struct ProductCommand<'a> {
    context: &'a AppContext,
    id: i64,
    json: bool,
}

impl<'a> ProductCommand<'a> {
    pub fn new(context: &'a AppContext, id: i64, json: bool) -> Self {
        Self { context, id, json }
    }
}

#[async_trait::async_trait]
impl Command for ProductCommand<'_> {
    async fn execute(&self) -> CliResult<()> {
        let product = self.context.catalog.product(self.id).await?;
        if self.json {
            return print_json(&product);
        }

        let style = OutputStyle::default();
        println!("{}", style.header(&format!("#{} {}", product.product_id, product.name)));
        if let Some(category) = &product.category {
            println!("  category: {category}");
        }
        if let Some(url) = &product.image_url {
            println!("  image:    {url}");
        }
        Ok(())
    }
}
