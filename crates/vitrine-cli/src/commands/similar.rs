// Show nearest neighbours of one product

use super::{print_json, Command};
use crate::app::AppContext;
use crate::error::CliResult;
use crate::output::OutputStyle;

pub struct SimilarCommand<'a> {
    context: &'a AppContext,
    id: i64,
    json: bool,
}

impl<'a> SimilarCommand<'a> {
    pub fn new(context: &'a AppContext, id: i64, json: bool) -> Self {
        Self { context, id, json }
    }
}

#[async_trait::async_trait]
impl Command for SimilarCommand<'_> {
    async fn execute(&self) -> CliResult<()> {
        let similar = self.context.catalog.similar(self.id).await?;
        if self.json {
            return print_json(&similar);
        }

        let style = OutputStyle::default();
        let base = &similar.base_product;
        println!(
            "{}",
            style.header(&format!("Similar to #{} {}", base.product_id, base.name))
        );
        if similar.neighbors.is_empty() {
            println!("{}", style.info("No similar products found"));
        }
        for (index, neighbor) in similar.neighbors.iter().enumerate() {
            println!(
                "{:>3}. #{} {} {}",
                index + 1,
                neighbor.product_id,
                neighbor.name,
                style.dim(&format!("(score {:.3})", neighbor.score))
            );
        }
        Ok(())
    }
}
