// List legal values of one attribute

use vitrine_search::Attribute;

use super::Command;
use crate::app::AppContext;
use crate::error::CliResult;
use crate::output::OutputStyle;

pub struct ValuesCommand<'a> {
    context: &'a AppContext,
    attribute: Attribute,
}

impl<'a> ValuesCommand<'a> {
    pub fn new(context: &'a AppContext, attribute: Attribute) -> Self {
        Self { context, attribute }
    }
}

#[async_trait::async_trait]
impl Command for ValuesCommand<'_> {
    async fn execute(&self) -> CliResult<()> {
        let style = OutputStyle::default();
        let values = self.context.catalog.values(self.attribute).await?;

        println!(
            "{}",
            style.header(&format!("{} ({} values)", self.attribute, values.len()))
        );
        for value in values {
            println!("  {value}");
        }
        Ok(())
    }
}
