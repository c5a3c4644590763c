//! The two user-facing operations: generate a plan from a brief, and refine a
//! plan given feedback. Both render the stored templates, call the provider
//! (or the offline example path when none is configured), and run recovery on
//! whatever comes back. The resulting plan replaces the previous one
//! wholesale; on failure nothing is installed.

use crate::brief::Brief;
use crate::cli::Slot;
use crate::config::Config;
use crate::errors::EventcraftError;
use crate::plan::{example, EventPlan};
use crate::provider::{ChatRequest, DynProvider};
use crate::recover::{self, Recovery};
use crate::store::TemplateStore;
use crate::template::{self, var};

pub struct Planner {
    store: TemplateStore,
    provider: Option<DynProvider>,
    cfg: Config,
}

/// What a generate/refine call produced: the recovered plan, the raw text it
/// came from, and the request that was (or would have been) sent.
pub struct Outcome {
    pub recovery: Recovery,
    pub raw: String,
    pub request: ChatRequest,
}

impl Outcome {
    pub fn plan(&self) -> &EventPlan {
        self.recovery.plan()
    }
}

impl Planner {
    pub fn new(store: TemplateStore, provider: Option<DynProvider>, cfg: Config) -> Self {
        Self { store, provider, cfg }
    }

    pub fn offline(&self) -> bool {
        self.provider.is_none()
    }

    pub async fn generate(
        &self,
        brief: &Brief,
        debug: bool,
    ) -> Result<Outcome, EventcraftError> {
        let instruction = self.store.get(Slot::SystemInstruction)?;
        let template_text = self.store.get(Slot::UserInput)?;
        let message = template::render(&template_text, &brief.variables());
        let request = self.chat_request(instruction, message);

        let raw = match &self.provider {
            Some(p) => self.send(p, &request, debug).await?,
            None => serialize_example(&example::example_plan(brief))?,
        };

        Ok(Outcome { recovery: recover::recover(&raw), raw, request })
    }

    pub async fn refine(
        &self,
        previous: &EventPlan,
        feedback: &str,
        brief: Option<&Brief>,
        debug: bool,
    ) -> Result<Outcome, EventcraftError> {
        let instruction = self.store.get(Slot::SystemInstruction)?;
        let template_text = self.store.get(Slot::Feedback)?;
        let message = template::render(&template_text, &refine_variables(previous, feedback, brief));
        let request = self.chat_request(instruction, message);

        let raw = match &self.provider {
            Some(p) => self.send(p, &request, debug).await?,
            None => serialize_example(&example::example_refined(previous, feedback))?,
        };

        Ok(Outcome { recovery: recover::recover(&raw), raw, request })
    }

    fn chat_request(&self, instruction: String, user_message: String) -> ChatRequest {
        ChatRequest {
            instruction,
            user_message,
            temperature: self.cfg.temperature,
            max_output_tokens: self.cfg.max_output_tokens,
        }
    }

    async fn send(
        &self,
        provider: &DynProvider,
        request: &ChatRequest,
        debug: bool,
    ) -> Result<String, EventcraftError> {
        provider
            .complete(request, debug)
            .await
            .map_err(|e| EventcraftError::Generation(format!("{e:#}")))
    }
}

/// Bindings for the feedback template: the original brief fields (or explicit
/// unavailable markers when the brief is gone), the previous plan as pretty
/// JSON, and the free-text feedback.
pub fn refine_variables(
    previous: &EventPlan,
    feedback: &str,
    brief: Option<&Brief>,
) -> Vec<(String, String)> {
    let mut vars = match brief {
        Some(b) => b.variables(),
        None => Brief::unavailable_variables(),
    };
    let serialized = serde_json::to_string_pretty(previous)
        .unwrap_or_else(|_| "<plan unavailable>".to_string());
    vars.push(var("existingEventPlan", serialized));
    vars.push(var("feedback", feedback));
    vars
}

fn serialize_example(plan: &EventPlan) -> Result<String, EventcraftError> {
    serde_json::to_string_pretty(plan).map_err(|e| EventcraftError::Generation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::UNAVAILABLE;
    use crate::recover::Recovery;
    use tempfile::tempdir;

    fn offline_planner(dir: &tempfile::TempDir) -> Planner {
        let store = TemplateStore::open(dir.path().join("store"));
        store.init().unwrap();
        Planner::new(store, None, Config::default())
    }

    fn glowserve() -> Brief {
        Brief {
            product_name: "GlowServe".to_string(),
            product_category: "beauty".to_string(),
            product_features: "hydration".to_string(),
            kpi_metrics: vec!["팔로워 증가".to_string()],
            budget: "500".to_string(),
            event_duration: "2 weeks".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn offline_generate_returns_the_example_payload_verbatim() {
        let dir = tempdir().unwrap();
        let planner = offline_planner(&dir);
        let brief = glowserve();

        let outcome = planner.generate(&brief, false).await.unwrap();
        assert!(planner.offline());
        match &outcome.recovery {
            Recovery::Parsed(plan) => {
                assert_eq!(plan, &example::example_plan(&brief));
                let (key, ev) = plan.events().next().unwrap();
                assert_eq!(key, "event1");
                assert_eq!(ev.budget, "500");
            }
            other => panic!("expected Parsed, got {}", other.label()),
        }
    }

    #[tokio::test]
    async fn generate_renders_brief_fields_into_the_user_message() {
        let dir = tempdir().unwrap();
        let planner = offline_planner(&dir);
        let outcome = planner.generate(&glowserve(), false).await.unwrap();
        assert!(outcome.request.user_message.contains("GlowServe"));
        assert!(outcome.request.user_message.contains("팔로워 증가"));
        assert!(!outcome.request.user_message.contains("{productName}"));
        assert_eq!(outcome.request.temperature, 0.7);
        assert_eq!(outcome.request.max_output_tokens, 3000);
    }

    #[tokio::test]
    async fn offline_refine_echoes_the_previous_plan_with_feedback_note() {
        let dir = tempdir().unwrap();
        let planner = offline_planner(&dir);
        let brief = glowserve();
        let previous = example::example_plan(&brief);

        let outcome = planner
            .refine(&previous, "bigger prizes", Some(&brief), false)
            .await
            .unwrap();
        assert!(planner.offline());
        let ev = outcome.plan().events().next().unwrap().1;
        assert!(ev.event_concept.contains("bigger prizes"));
        assert!(outcome.request.user_message.contains("bigger prizes"));
        // The {existingEventPlan} token was substituted with the plan JSON.
        assert!(!outcome.request.user_message.contains("{existingEventPlan}"));
    }

    #[test]
    fn refine_without_brief_marks_placeholders_unavailable() {
        let previous = EventPlan::default();
        let vars = refine_variables(&previous, "fb", None);
        let product = vars.iter().find(|(n, _)| n == "productName").unwrap();
        assert_eq!(product.1, UNAVAILABLE);
        let feedback = vars.iter().find(|(n, _)| n == "feedback").unwrap();
        assert_eq!(feedback.1, "fb");
        assert!(vars.iter().any(|(n, _)| n == "existingEventPlan"));
    }
}
