//! Prompt templates

use vitrine_search::{Attribute, DomainValues};

/// Longest subcategory list shown to the model
pub const SUBCATEGORY_PROMPT_LIMIT: usize = 40;
/// Longest article type list shown to the model
pub const ARTICLE_TYPE_PROMPT_LIMIT: usize = 30;

fn listing(values: &DomainValues, attribute: Attribute, limit: Option<usize>) -> String {
    let all = values.get(attribute);
    let shown = limit.map_or(all, |n| &all[..all.len().min(n)]);
    shown.join(", ")
}

/// Ask the model to map a free-text description onto legal attribute values
pub fn interpretation_prompt(description: &str, values: &DomainValues) -> String {
    format!(
        r#"You are an expert retail assistant.
A shopper wrote: "{description}" (it may be in any language).

Your task:
1. Pick the values from the lists below that best match the description.
2. Use only the listed values. Do not invent or translate values.
3. Return a JSON object with at most two filters, preferring subcategory and basecolour when relevant.
4. Do not include any other text or explanation.

Available values:
- basecolour: {colours}
- subcategory: {subcategories}
- mastercategory: {categories}
- articletype: {article_types}

Example: {{"subcategory":"Gloves","basecolour":"Green"}}
"#,
        colours = listing(values, Attribute::BaseColour, None),
        subcategories = listing(values, Attribute::SubCategory, Some(SUBCATEGORY_PROMPT_LIMIT)),
        categories = listing(values, Attribute::MasterCategory, None),
        article_types = listing(values, Attribute::ArticleType, Some(ARTICLE_TYPE_PROMPT_LIMIT)),
    )
}

/// Ask for a one-sentence summary of why the results fit
pub fn explanation_prompt(description: &str) -> String {
    format!(r#"Summarise in one sentence why these products match "{description}"."#)
}

/// Ask for a short marketing description of one product.
///
/// `seed` varies the prompt between calls so repeated products do not read alike.
pub fn description_prompt(name: &str, category: Option<&str>, seed: u32) -> String {
    let category = category.filter(|c| !c.trim().is_empty()).unwrap_or("unspecified");
    format!(
        r#"You are a marketing copywriter for an online department store.
Write a short, unique and appealing description for one product.

Product details:
- Name: "{name}"
- Category: "{category}"

Guidelines:
- Be original and avoid stock phrasing.
- Use a natural, persuasive tone that changes every time.
- For fashion, highlight style and feel. For electronics, innovation and usefulness. For home goods, comfort and looks.
- At most 3 sentences and under 70 words.
- No quotation marks, emojis or HTML.
- Creative seed: {seed}

Return only the description text."#
    )
}

/// Ask the model to classify a chat message as a JSON intent object
pub fn intent_prompt(message: &str) -> String {
    format!(
        r#"You classify the intent of messages sent to an e-commerce chatbot.
Reply with valid JSON only, shaped as {{"intent": "...", "entities": {{...}}}}.

Possible intents:
- identify_user: the user gives a customer number (e.g. "I am 12345")
- product_details: the user wants more detail about a product
- similar_products: the user wants recommendations like a given product
- search_by_description: the user describes something to find (e.g. "find red trainers")
- greeting: the user says hello
- unknown: none of the above

Examples:
User: "hello"
Reply: {{"intent":"greeting","entities":{{}}}}

User: "I am customer 12345"
Reply: {{"intent":"identify_user","entities":{{"customer_id":"12345"}}}}

User: "find red trainers"
Reply: {{"intent":"search_by_description","entities":{{"description":"red trainers"}}}}

User message: "{message}""#
    )
}
