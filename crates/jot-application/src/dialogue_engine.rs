//! The dialogue engine use case.

use std::sync::Arc;

use jot_core::note::NoteRepository;
use jot_core::session::{AiTurn, Language, LastAnswer, Mode, SessionState, Settings};
use jot_core::slash_command::{available_commands, CommandContext};
use jot_interaction::{
    AnswerAgent, AnswerRequest, Dispatcher, IntentClassifier, PromptBuilder, Texts,
};
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::protocol::{OutboundMessage, Request, Response};

/// Session state plus the token shared by the answers it is waiting for.
struct EngineSession {
    state: SessionState,
    answers: CancellationToken,
}

impl EngineSession {
    /// Cancels every outstanding answer and starts a fresh token.
    fn cancel_answers(&mut self) {
        self.answers.cancel();
        self.answers = CancellationToken::new();
    }
}

/// One conversation with the note assistant.
///
/// `handle` holds the session lock for the whole classify/dispatch of a
/// request. AI answers are computed on spawned tasks and delivered through
/// the channel returned by [`DialogueEngine::new`].
pub struct DialogueEngine {
    id: Uuid,
    session: Arc<Mutex<EngineSession>>,
    classifier: IntentClassifier,
    dispatcher: Dispatcher,
    notes: Arc<dyn NoteRepository>,
    agent: Arc<dyn AnswerAgent>,
    outbound: mpsc::UnboundedSender<OutboundMessage>,
}

impl DialogueEngine {
    /// Creates an engine and the receiver for its asynchronous messages.
    pub fn new(
        notes: Arc<dyn NoteRepository>,
        agent: Arc<dyn AnswerAgent>,
        settings: Settings,
    ) -> (Self, mpsc::UnboundedReceiver<OutboundMessage>) {
        let (outbound, receiver) = mpsc::unbounded_channel();
        let engine = Self {
            id: Uuid::new_v4(),
            session: Arc::new(Mutex::new(EngineSession {
                state: SessionState::new(settings),
                answers: CancellationToken::new(),
            })),
            classifier: IntentClassifier::default(),
            dispatcher: Dispatcher::new(notes.clone()),
            notes,
            agent,
            outbound,
        };
        info!(
            "[Engine] Session {} started ({}, auto_confirm={})",
            engine.id, settings.language, settings.auto_confirm
        );
        (engine, receiver)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// A copy of the current session state.
    pub async fn session_state(&self) -> SessionState {
        self.session.lock().await.state.clone()
    }

    pub async fn handle(&self, request: Request) -> Response {
        match request {
            Request::Chat {
                text,
                lang,
                auto_confirm,
            } => {
                let mut session = self.session.lock().await;
                Self::apply_settings(&mut session.state, lang.as_deref(), auto_confirm);
                let reply = self.chat(&text, &mut session).await;
                Response::Reply { text: reply }
            }
            Request::GetCommands => {
                let session = self.session.lock().await;
                let context = CommandContext::of(&session.state);
                debug!("[Engine] Listing commands for {:?}", context);
                Response::AvailableCommands {
                    commands: available_commands(context, session.state.settings().language),
                }
            }
            Request::SaveSettings { lang, auto_confirm } => {
                let mut session = self.session.lock().await;
                Self::apply_settings(&mut session.state, lang.as_deref(), auto_confirm);
                let settings = *session.state.settings();
                info!(
                    "[Engine] Settings saved ({}, auto_confirm={})",
                    settings.language, settings.auto_confirm
                );
                Response::Reply {
                    text: Texts::new(settings.language).settings_saved(),
                }
            }
        }
    }

    fn apply_settings(state: &mut SessionState, lang: Option<&str>, auto_confirm: Option<bool>) {
        let settings = state.settings_mut();
        if let Some(code) = lang {
            settings.language = Language::from_code(code);
        }
        if let Some(auto_confirm) = auto_confirm {
            settings.auto_confirm = auto_confirm;
        }
    }

    async fn chat(&self, text: &str, session: &mut EngineSession) -> String {
        let generation = session.state.generation();

        let intent = self.classifier.classify(text, &mut session.state);
        let outcome = self
            .dispatcher
            .dispatch(&intent, text, &mut session.state)
            .await;

        if session.state.generation() != generation {
            debug!(
                "[Engine] Conversation generation {} -> {}, cancelling pending answers",
                generation,
                session.state.generation()
            );
            session.cancel_answers();
        }

        if let Some(request) = outcome.answer_request {
            self.spawn_answer(request, session.answers.child_token());
        }
        outcome.reply
    }

    fn spawn_answer(&self, request: AnswerRequest, token: CancellationToken) {
        let session = self.session.clone();
        let notes = self.notes.clone();
        let agent = self.agent.clone();
        let outbound = self.outbound.clone();

        tokio::spawn(async move {
            let note_id = request.note.id.clone();
            let work = async {
                let prompt = PromptBuilder.build(&request, notes.as_ref()).await?;
                agent.ask(&prompt).await
            };

            let result = tokio::select! {
                _ = token.cancelled() => {
                    warn!("[Engine] Answer for note {} cancelled", note_id);
                    return;
                }
                result = work => result,
            };

            let mut session = session.lock().await;
            let current = matches!(
                session.state.mode(),
                Mode::AiConversation { note, generation, .. }
                    if *generation == request.generation && note.id == note_id
            );
            if !current {
                warn!(
                    "[Engine] Dropping stale answer for note {} (generation {})",
                    note_id, request.generation
                );
                return;
            }

            let message = match result {
                Ok(text) => {
                    if let Mode::AiConversation { history, .. } = session.state.mode_mut() {
                        history.push(AiTurn {
                            user: request.question.clone(),
                            ai: text.clone(),
                        });
                    }
                    session.state.set_last_answer(LastAnswer {
                        note_id: note_id.clone(),
                        note_title: request.note.title.clone(),
                        text: text.clone(),
                    });
                    OutboundMessage::AiAnswer { note_id, text }
                }
                Err(e) => {
                    error!("[Engine] Answer for note {} failed: {}", note_id, e);
                    OutboundMessage::AiFailure {
                        note_id,
                        text: Texts::new(session.state.settings().language).apology(),
                    }
                }
            };

            if outbound.send(message).is_err() {
                debug!("[Engine] Outbound receiver closed, answer discarded");
            }
        });
    }
}
