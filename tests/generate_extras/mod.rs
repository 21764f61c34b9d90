use std::sync::Mutex;

use llm::{
    chat::{ChatMessage, ChatProvider, ChatResponse, Tool},
    error::LLMError,
};
use skumap::storage::Product;

#[macro_export]
macro_rules! assert_generated {
    (
        $(
            $test_name:ident : response => $response:expr, result => $result:expr
        ),+ $(,)?
    ) => {
        $(
            #[tokio::test]
            async fn $test_name() {
                let context = skumap::generate::GenerateContext {
                    model: &StubLlmProvider::new($response.to_owned()),
                    preamble: None,
                    rate_limiter: None,
                };
                let result = skumap::generate::generate_content(
                    &$crate::generate_extras::sample_product(),
                    &skumap::generate::AiField::ALL,
                    &context,
                )
                .await
                .expect("Expected successful processing.");

                assert_that(&result).is_equal_to($result);
            }
        )+
    }
}

/// A confirmed product with nothing filled in yet.
pub fn sample_product() -> Product {
    let mut product = Product::new("HSA50", "Stihl HSA 50 Cordless Hedge Trimmer", "199.00");
    product.status = skumap::storage::Status::Confirmed;
    product
}

pub(crate) struct StubLlmProvider {
    response_content: String,
    prompts: Mutex<Vec<String>>,
}

impl StubLlmProvider {
    pub fn new(response_content: String) -> Self {
        StubLlmProvider {
            response_content,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, one entry per chat call.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("Stub mutex poisoned").clone()
    }
}

impl ChatProvider for StubLlmProvider {
    fn chat<'life0, 'life1, 'async_trait>(
        &'life0 self,
        messages: &'life1 [ChatMessage],
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Box<dyn ChatResponse>, LLMError>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            #[derive(Debug)]
            struct StringResponse(String);

            impl ChatResponse for StringResponse {
                fn text(&self) -> Option<String> {
                    Some(self.0.clone())
                }

                fn tool_calls(&self) -> Option<Vec<llm::ToolCall>> {
                    panic!()
                }

                fn thinking(&self) -> Option<String> {
                    None
                }

                fn usage(&self) -> Option<llm::chat::Usage> {
                    None
                }
            }

            impl std::fmt::Display for StringResponse {
                fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(formatter, "{}", self.0)
                }
            }

            self.prompts.lock().expect("Stub mutex poisoned").push(
                messages
                    .iter()
                    .map(|message| message.content.clone())
                    .collect::<Vec<_>>()
                    .join("\n"),
            );

            Ok(Box::new(StringResponse(self.response_content.clone())) as Box<dyn ChatResponse>)
        })
    }

    fn chat_with_tools<'life0, 'life1, 'life2, 'async_trait>(
        &'life0 self,
        _messages: &'life1 [ChatMessage],
        _tools: Option<&'life2 [Tool]>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Box<dyn ChatResponse>, LLMError>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        'life2: 'async_trait,
        Self: 'async_trait,
    {
        panic!()
    }
}
