use crate::llm::client::{LLMClient, LLMResponse};
use crate::types::{AppError, Result, ToolCall, ToolDefinition};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessage,
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, ChatCompletionTool, ChatCompletionToolChoiceOption,
        ChatCompletionToolType, CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse, FunctionObject,
    },
};
use async_trait::async_trait;
use serde_json::Value;

/// Chat completions client for any OpenAI-compatible endpoint.
pub struct OpenAIClient {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAIClient {
    pub fn new(api_key: String, api_base: String, model: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);

        Self {
            client: Client::with_config(config),
            model,
            temperature: 0.0,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn request(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<CreateChatCompletionRequest> {
        CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(self.temperature)
            .messages(messages)
            .build()
            .map_err(|e| AppError::LLM(format!("invalid completion request: {e}")))
    }

    async fn send(&self, request: CreateChatCompletionRequest) -> Result<CreateChatCompletionResponse> {
        tracing::debug!(model = %self.model, messages = request.messages.len(), "Chat completion request");
        self.client.chat().create(request).await.map_err(|e| {
            tracing::warn!(model = %self.model, error = %e, "Chat completion failed");
            AppError::LLM(format!("completion request failed: {e}"))
        })
    }

    async fn complete(&self, messages: Vec<ChatCompletionRequestMessage>) -> Result<String> {
        let response = self.send(self.request(messages)?).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::LLM(format!("Empty completion from {}", self.model)))
    }
}

fn to_message(role: &str, content: &str) -> ChatCompletionRequestMessage {
    match role {
        "system" => ChatCompletionRequestMessage::System(
            ChatCompletionRequestSystemMessage::from(content.to_string()),
        ),
        "assistant" => ChatCompletionRequestMessage::Assistant(
            ChatCompletionRequestAssistantMessage::from(content.to_string()),
        ),
        _ => ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage::from(
            content.to_string(),
        )),
    }
}

fn tool_spec(tool: &ToolDefinition) -> ChatCompletionTool {
    ChatCompletionTool {
        r#type: ChatCompletionToolType::Function,
        function: FunctionObject {
            name: tool.name.clone(),
            description: Some(tool.description.clone()),
            parameters: Some(tool.parameters.clone()),
            strict: None,
        },
    }
}

/// Arguments that are not valid JSON become an empty object.
fn tool_call(call: ChatCompletionMessageToolCall) -> ToolCall {
    let arguments = serde_json::from_str(&call.function.arguments).unwrap_or_else(|e| {
        tracing::warn!(tool = %call.function.name, error = %e, "Tool call arguments are not JSON");
        Value::Object(Default::default())
    });
    ToolCall {
        id: call.id,
        name: call.function.name,
        arguments,
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.complete(vec![to_message("user", prompt)]).await
    }

    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.complete(vec![to_message("system", system), to_message("user", prompt)])
            .await
    }

    async fn generate_with_history(&self, messages: &[(String, String)]) -> Result<String> {
        let chat_messages = messages
            .iter()
            .map(|(role, content)| to_message(role, content))
            .collect();

        self.complete(chat_messages).await
    }

    async fn generate_with_tools(
        &self,
        system: &str,
        prompt: &str,
        tools: &[ToolDefinition],
    ) -> Result<LLMResponse> {
        let mut request = self.request(vec![to_message("system", system), to_message("user", prompt)])?;
        request.tools = Some(tools.iter().map(tool_spec).collect());
        request.tool_choice = Some(ChatCompletionToolChoiceOption::Auto);

        let response = self.send(request).await?;
        let Some(choice) = response.choices.into_iter().next() else {
            return Err(AppError::LLM(format!("Empty completion from {}", self.model)));
        };

        let finish_reason = choice
            .finish_reason
            .and_then(|reason| serde_json::to_value(reason).ok())
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_else(|| "unknown".to_string());

        Ok(LLMResponse {
            content: choice.message.content.unwrap_or_default(),
            tool_calls: choice
                .message
                .tool_calls
                .unwrap_or_default()
                .into_iter()
                .map(tool_call)
                .collect(),
            finish_reason,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
