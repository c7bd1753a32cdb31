// Generate a product description

use vitrine_assistant::Describer;

use super::Command;
use crate::app::AppContext;
use crate::error::CliResult;

pub struct DescribeCommand<'a> {
    context: &'a AppContext,
    name: String,
    category: Option<String>,
}

impl<'a> DescribeCommand<'a> {
    pub fn new(context: &'a AppContext, name: String, category: Option<String>) -> Self {
        Self {
            context,
            name,
            category,
        }
    }
}

#[async_trait::async_trait]
impl Command for DescribeCommand<'_> {
    async fn execute(&self) -> CliResult<()> {
        let describer = self.context.describer()?;
        let text = describer
            .describe(&self.name, self.category.as_deref())
            .await?;
        println!("{text}");
        Ok(())
    }
}
