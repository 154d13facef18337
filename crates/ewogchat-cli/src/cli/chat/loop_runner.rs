//! Main chat loop orchestration.
//!
//! Coordinates the complete conversation lifecycle: config loading,
//! credential resolution, provider construction, welcome banner, seeded
//! greeting, and the input loop with streaming responses.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use console::style;

use ewogchat_core::chat::engine::ChatEngine;
use ewogchat_core::chat::session::SessionManager;
use ewogchat_core::llm::box_provider::BoxChatProvider;
use ewogchat_infra::config::{load_app_config, resolve_credentials};
use ewogchat_infra::llm::azure::{AzureOpenAiConfig, AzureOpenAiProvider};
use ewogchat_infra::secret::EnvSecretStore;
use ewogchat_types::chat::Transcript;

use super::banner::{print_farewell, print_welcome_banner};
use super::input::{ChatInput, InputEvent, InputSource};

/// Label printed before every assistant reply.
const ASSISTANT_LABEL: &str = "Fuzzy Friends customer service:>";

/// Run the interactive chat session for the `ewog chat` command.
///
/// Resolves configuration and credentials, builds the Azure provider, and
/// drives the conversation loop until the user exits. Credential problems
/// surface here, before the loop is entered.
pub async fn run_chat_loop(config_path: &Path, no_stream: bool) -> anyhow::Result<()> {
    let app_config = load_app_config(config_path).await;
    let secrets = EnvSecretStore::new();
    let resolved = resolve_credentials(app_config, &secrets)
        .await
        .context("startup configuration failed")?;

    let streaming = resolved.config.streaming && !no_stream;
    let greeting = resolved.config.greeting.clone();

    let provider = AzureOpenAiProvider::new(AzureOpenAiConfig {
        endpoint: resolved.endpoint,
        deployment: resolved.config.deployment.clone(),
        api_version: resolved.config.api_version.clone(),
        api_key: resolved.api_key,
        search: resolved.config.search.clone(),
        search_api_key: resolved.search_api_key,
    })
    .map_err(|e| anyhow::anyhow!("failed to create Azure provider: {e}"))?;

    let engine = ChatEngine::new(
        BoxChatProvider::new(provider),
        resolved.config.params.clone(),
    );
    let mut transcript = Transcript::seeded(&greeting);
    let mut session = SessionManager::new(streaming);

    print_welcome_banner(
        &resolved.config.deployment,
        &session.session().id.to_string(),
        streaming,
    );
    println!("  {} {}", style(ASSISTANT_LABEL).cyan().bold(), greeting);
    println!();

    let prompt = format!("  {} ", style("User:>").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("failed to initialize input: {e}"))?;

    run_session(
        &engine,
        &mut transcript,
        &mut session,
        &mut chat_input,
        streaming,
    )
    .await;

    tracing::info!(
        turns = session.turn_count(),
        session_id = %session.session().id,
        "Chat session ended"
    );
    Ok(())
}

/// Drive the conversation loop until an exit trigger.
///
/// EOF, Ctrl+C, and the literal input `exit` all terminate normally with a
/// farewell. A failed turn is reported visibly and the loop continues; the
/// transcript keeps the user message for that turn but gains no assistant
/// message.
async fn run_session<I: InputSource>(
    engine: &ChatEngine,
    transcript: &mut Transcript,
    session: &mut SessionManager,
    input: &mut I,
    streaming: bool,
) {
    loop {
        match input.read_line().await {
            InputEvent::Eof | InputEvent::Interrupted => {
                print_farewell();
                break;
            }
            InputEvent::Message(text) => {
                // Exact match only; "exit " or "Exit" is a normal message,
                // and input is forwarded verbatim, whitespace included.
                if text == "exit" {
                    print_farewell();
                    break;
                }

                if run_turn(engine, transcript, &text, streaming).await {
                    session.increment_turn();
                }
            }
        }
    }

    session.mark_completed();
}

/// Execute one turn, printing the reply. Returns whether it succeeded.
async fn run_turn(
    engine: &ChatEngine,
    transcript: &mut Transcript,
    text: &str,
    streaming: bool,
) -> bool {
    let spinner = indicatif::ProgressBar::new_spinner();
    if let Ok(template) = indicatif::ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = if streaming {
        let mut first_fragment = true;
        engine
            .run_turn_streaming(transcript, text, |fragment| {
                if first_fragment {
                    spinner.finish_and_clear();
                    first_fragment = false;
                    print!("\n  {} ", style(ASSISTANT_LABEL).cyan().bold());
                }
                print!("{fragment}");
                let _ = std::io::stdout().flush();
            })
            .await
            .map(|_| ())
    } else {
        engine.run_turn(transcript, text).await.map(|reply| {
            spinner.finish_and_clear();
            println!("\n  {} {reply}", style(ASSISTANT_LABEL).cyan().bold());
        })
    };

    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            println!();
            println!();
            true
        }
        Err(e) => {
            eprintln!("\n  {} Service error: {e}", style("!").red().bold());
            eprintln!(
                "  {}",
                style("Type a message to try again, or 'exit' to quit.").dim()
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::pin::Pin;

    use futures_util::Stream;

    use ewogchat_core::llm::provider::ChatProvider;
    use ewogchat_types::config::ExecutionParams;
    use ewogchat_types::llm::{
        CompletionRequest, CompletionResponse, FinishReason, LlmError, MessageRole, StreamEvent,
        Usage,
    };

    /// Scripted input: plays back a fixed sequence of events, then EOF.
    struct ScriptedInput(VecDeque<InputEvent>);

    impl ScriptedInput {
        fn new(events: Vec<InputEvent>) -> Self {
            Self(events.into())
        }
    }

    impl InputSource for ScriptedInput {
        async fn read_line(&mut self) -> InputEvent {
            self.0.pop_front().unwrap_or(InputEvent::Eof)
        }
    }

    /// Provider that always replies with the same text.
    struct FixedProvider {
        reply: String,
        fragments: Vec<String>,
        fail: bool,
    }

    impl FixedProvider {
        fn replying(reply: &str, fragments: &[&str]) -> Self {
            Self {
                reply: reply.to_string(),
                fragments: fragments.iter().map(|s| s.to_string()).collect(),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                reply: String::new(),
                fragments: Vec::new(),
                fail: true,
            }
        }
    }

    impl ChatProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            if self.fail {
                return Err(LlmError::Provider {
                    message: "service unavailable".to_string(),
                });
            }
            Ok(CompletionResponse {
                id: "resp-1".to_string(),
                content: self.reply.clone(),
                model: "gpt-test".to_string(),
                finish_reason: FinishReason::Stop,
                usage: Usage::default(),
            })
        }

        fn stream(
            &self,
            _request: CompletionRequest,
        ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>> {
            if self.fail {
                return Box::pin(futures_util::stream::once(async {
                    Err(LlmError::Stream("connection reset".to_string()))
                }));
            }
            let mut events: Vec<Result<StreamEvent, LlmError>> = vec![Ok(StreamEvent::Connected)];
            events.extend(
                self.fragments
                    .iter()
                    .map(|f| Ok(StreamEvent::TextDelta { text: f.clone() })),
            );
            events.push(Ok(StreamEvent::Done));
            Box::pin(futures_util::stream::iter(events))
        }
    }

    fn engine(provider: FixedProvider) -> ChatEngine {
        ChatEngine::new(BoxChatProvider::new(provider), ExecutionParams::default())
    }

    fn message(text: &str) -> InputEvent {
        InputEvent::Message(text.to_string())
    }

    #[tokio::test]
    async fn test_exit_as_first_input_leaves_seed_only() {
        let engine = engine(FixedProvider::replying("unused", &[]));
        let mut transcript = Transcript::seeded("Hi there...");
        let mut session = SessionManager::new(false);
        let mut input = ScriptedInput::new(vec![message("exit")]);

        run_session(&engine, &mut transcript, &mut session, &mut input, false).await;

        assert_eq!(transcript.len(), 1);
        assert_eq!(session.turn_count(), 0);
    }

    #[tokio::test]
    async fn test_eof_at_first_prompt_behaves_like_exit() {
        let engine = engine(FixedProvider::replying("unused", &[]));
        let mut transcript = Transcript::seeded("Hi there...");
        let mut session = SessionManager::new(false);
        let mut input = ScriptedInput::new(vec![InputEvent::Eof]);

        run_session(&engine, &mut transcript, &mut session, &mut input, false).await;

        assert_eq!(transcript.len(), 1);
        assert_eq!(session.turn_count(), 0);
    }

    #[tokio::test]
    async fn test_interrupt_terminates_cleanly() {
        let engine = engine(FixedProvider::replying("unused", &[]));
        let mut transcript = Transcript::seeded("Hi there...");
        let mut session = SessionManager::new(false);
        let mut input = ScriptedInput::new(vec![InputEvent::Interrupted]);

        run_session(&engine, &mut transcript, &mut session, &mut input, false).await;

        assert_eq!(transcript.len(), 1);
    }

    #[tokio::test]
    async fn test_scenario_non_streaming() {
        let engine = engine(FixedProvider::replying("Yes, we do.", &[]));
        let mut transcript = Transcript::seeded("Hi there...");
        let mut session = SessionManager::new(false);
        let mut input =
            ScriptedInput::new(vec![message("Do you sell Ewogs?"), message("exit")]);

        run_session(&engine, &mut transcript, &mut session, &mut input, false).await;

        let contents: Vec<&str> = transcript
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(
            contents,
            vec!["Hi there...", "Do you sell Ewogs?", "Yes, we do."]
        );
        assert_eq!(session.turn_count(), 1);
    }

    #[tokio::test]
    async fn test_scenario_streaming_appends_concatenation() {
        let engine = engine(FixedProvider::replying("", &["Yes, ", "we ", "do."]));
        let mut transcript = Transcript::seeded("Hi there...");
        let mut session = SessionManager::new(true);
        let mut input =
            ScriptedInput::new(vec![message("Do you sell Ewogs?"), message("exit")]);

        run_session(&engine, &mut transcript, &mut session, &mut input, true).await;

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.last().unwrap().content, "Yes, we do.");
    }

    #[tokio::test]
    async fn test_transcript_grows_two_per_turn() {
        let engine = engine(FixedProvider::replying("ok", &[]));
        let mut transcript = Transcript::seeded("greeting");
        let mut session = SessionManager::new(false);
        let mut input = ScriptedInput::new(vec![
            message("one"),
            message("two"),
            message("three"),
            InputEvent::Eof,
        ]);

        run_session(&engine, &mut transcript, &mut session, &mut input, false).await;

        assert_eq!(transcript.len(), 2 * 3 + 1);
        assert_eq!(session.turn_count(), 3);
    }

    #[tokio::test]
    async fn test_failed_turn_reports_and_continues() {
        let engine = engine(FixedProvider::failing());
        let mut transcript = Transcript::seeded("greeting");
        let mut session = SessionManager::new(false);
        // A second message after the failure proves the loop keeps going.
        let mut input =
            ScriptedInput::new(vec![message("Do you sell Ewogs?"), message("exit")]);

        run_session(&engine, &mut transcript, &mut session, &mut input, false).await;

        // User message kept, no assistant message appended.
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.last().unwrap().role, MessageRole::User);
        assert_eq!(session.turn_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_input_is_dispatched_verbatim() {
        let engine = engine(FixedProvider::replying("ok", &[]));
        let mut transcript = Transcript::seeded("greeting");
        let mut session = SessionManager::new(false);
        let mut input = ScriptedInput::new(vec![message(""), message("exit")]);

        run_session(&engine, &mut transcript, &mut session, &mut input, false).await;

        // An empty line is a normal turn, not a skip.
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.messages()[1].content, "");
        assert_eq!(session.turn_count(), 1);
    }

    #[tokio::test]
    async fn test_exit_with_trailing_whitespace_is_a_message() {
        let engine = engine(FixedProvider::replying("ok", &[]));
        let mut transcript = Transcript::seeded("greeting");
        let mut session = SessionManager::new(false);
        let mut input = ScriptedInput::new(vec![message("exit "), message("exit")]);

        run_session(&engine, &mut transcript, &mut session, &mut input, false).await;

        // "exit " does not terminate; it reaches the transcript verbatim.
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.messages()[1].content, "exit ");
        assert_eq!(session.turn_count(), 1);
    }

    #[tokio::test]
    async fn test_input_whitespace_is_preserved() {
        let engine = engine(FixedProvider::replying("ok", &[]));
        let mut transcript = Transcript::seeded("greeting");
        let mut session = SessionManager::new(false);
        let mut input = ScriptedInput::new(vec![message("  Do you sell Ewogs?  "), message("exit")]);

        run_session(&engine, &mut transcript, &mut session, &mut input, false).await;

        assert_eq!(transcript.messages()[1].content, "  Do you sell Ewogs?  ");
    }

    #[tokio::test]
    async fn test_exit_is_case_sensitive() {
        let engine = engine(FixedProvider::replying("We close at five.", &[]));
        let mut transcript = Transcript::seeded("greeting");
        let mut session = SessionManager::new(false);
        // "Exit" is a normal message, not a termination trigger.
        let mut input = ScriptedInput::new(vec![message("Exit"), message("exit")]);

        run_session(&engine, &mut transcript, &mut session, &mut input, false).await;

        assert_eq!(transcript.len(), 3);
        assert_eq!(session.turn_count(), 1);
    }
}
