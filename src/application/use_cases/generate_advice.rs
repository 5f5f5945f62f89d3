use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::{AdviceReply, DomainError, FailureKind};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Persona and safety rules sent with every advice request.
pub const SYSTEM_INSTRUCTION: &str = "\
You are 'VoltBot', an intelligent virtual assistant for 'VoltSafe', a professional \
electrical service company in Australia.

Interaction Guidelines:
1. **Persona**: Polite, calm, professional, and helpful. Use Australian English \
(you can use \"mate\" occasionally but keep it professional).
2. **Main Task**: Answer basic home electrical questions, provide energy-saving tips, \
and explain VoltSafe services.
3. **Price Estimates**: If asked about price, provide rough ranges in AUD (e.g., \
\"For a switchboard upgrade, costs typically range from $1,500 - $3,000 AUD depending \
on complexity\").
4. **SAFETY (CRITICAL)**: If the user mentions danger signs like \"burning smell\", \
\"smoke\", \"sparks\", \"hot cables\", or \"electric shock\", STOP diagnosing. \
Immediately tell them to turn off the power at the main switchboard and advise them \
to call our emergency line or 000 if there is a fire.
5. **Limitations**: Do not give deep technical DIY instructions that are dangerous for \
unlicensed individuals (like opening the main panel). Advise them to book a licensed \
electrician.

Keep answers concise and easy to read (use bullet points if necessary).";

/// Turns one free-text question into one VoltBot reply.
///
/// Stateless and reentrant: each call issues exactly one completion request
/// with the fixed system instruction. [`execute`](Self::execute) never fails;
/// every error is logged and collapsed into fallback text, with the
/// [`FailureKind`](crate::domain::FailureKind) kept on the reply.
pub struct GenerateAdviceUseCase {
    client: Arc<dyn ChatClient>,
    system_instruction: String,
    timeout: Duration,
}

impl GenerateAdviceUseCase {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self {
            client,
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }

    /// Ask for advice and keep the structured outcome.
    ///
    /// Empty or whitespace-only generated text is reported as
    /// [`DomainError::EmptyResponse`].
    pub async fn try_generate(&self, query: &str) -> Result<String, DomainError> {
        let start = Instant::now();
        let call = self.client.complete(&self.system_instruction, query);

        let text = match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(DomainError::timeout(format!(
                    "no reply from {} within {:.1}s",
                    self.client.model_name(),
                    self.timeout.as_secs_f64()
                )))
            }
        };

        debug!(
            "Advice from {} in {:.2}s ({} chars)",
            self.client.model_name(),
            start.elapsed().as_secs_f64(),
            text.len()
        );

        if text.trim().is_empty() {
            return Err(DomainError::EmptyResponse);
        }
        Ok(text)
    }

    pub async fn execute(&self, query: &str) -> AdviceReply {
        match self.try_generate(query).await {
            Ok(text) => AdviceReply::answered(text),
            Err(DomainError::EmptyResponse) => {
                warn!("Advice request returned no text");
                AdviceReply::failed(FailureKind::EmptyResponse)
            }
            Err(e) => {
                warn!("Error generating advice: {e}");
                AdviceReply::failed(e.failure_kind())
            }
        }
    }

    /// Reply text only: the generated answer, the apology, or the fallback.
    pub async fn generate_advice(&self, query: &str) -> String {
        self.execute(query).await.into_text()
    }
}
