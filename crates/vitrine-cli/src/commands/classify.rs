// Classify a chat message by intent

use vitrine_assistant::{IntentClassifier, IntentResult};

use super::{print_json, Command};
use crate::app::AppContext;
use crate::error::CliResult;
use crate::output::OutputStyle;

pub struct ClassifyCommand<'a> {
    context: &'a AppContext,
    message: String,
    json: bool,
}

impl<'a> ClassifyCommand<'a> {
    pub fn new(context: &'a AppContext, message: String, json: bool) -> Self {
        Self {
            context,
            message,
            json,
        }
    }

    pub fn render(style: &OutputStyle, result: &IntentResult) -> String {
        let mut lines = vec![style.header(&format!("intent: {}", result.intent))];
        for key in result.entities.keys() {
            if let Some(value) = result.entity(key) {
                lines.push(format!("  {key}: {value}"));
            }
        }
        lines.join("\n")
    }
}

#[async_trait::async_trait]
impl Command for ClassifyCommand<'_> {
    async fn execute(&self) -> CliResult<()> {
        let classifier = self.context.intent_classifier()?;
        let result = classifier.classify(&self.message).await?;
        if self.json {
            return print_json(&result);
        }
        println!("{}", Self::render(&OutputStyle::default(), &result));
        Ok(())
    }
}
