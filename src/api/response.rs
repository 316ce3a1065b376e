use super::models::{ChatCompletionResponse, MessageListPage, Role};

/// Concatenate the text of every choice in a completion response.
pub fn collect_content(response: &ChatCompletionResponse) -> String {
    response
        .choices
        .iter()
        .filter_map(|choice| choice.message.content.as_deref())
        .collect()
}

/// Newest assistant message text from an ascending thread listing.
pub fn newest_assistant_text(page: &MessageListPage) -> Option<String> {
    page.data
        .iter()
        .rev()
        .find(|message| message.role == Role::Assistant)
        .and_then(|message| {
            message
                .content
                .iter()
                .find_map(|block| block.text.as_ref().map(|text| text.value.clone()))
        })
}
