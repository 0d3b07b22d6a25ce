//! Orchestration of the generate-then-merge flow.
//!
//! The [`Assistant`] owns the generation service and the policy knobs; the
//! document host is passed into each operation, never captured. Nothing is
//! mutated before the service returns, so a failed generation always leaves
//! the document exactly as it was.

pub mod prompt;
pub mod service;

use crate::editing::{
    DocumentHost, HostError, MergePolicy, MergeReport, append_blocks, body_to_paragraphs,
    continue_at_cursor, replace_document, targeted_merge,
};
use crate::model::{Outline, content_under};
use crate::parsing::{DEFAULT_HEADING_CAP, LineClassifier};

pub use prompt::{content_prompt, continue_prompt, freeform_content_prompt, structure_prompt};
pub use service::{GenerationError, GenerationParams, GenerationService};

/// Where freshly generated structure goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructurePlacement {
    /// Discard the current document and start over with the new outline.
    Replace,
    /// Keep the document and add the new outline after its last block.
    Append,
}

#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    #[error("a generation request is already in flight")]
    RequestInFlight,
    #[error("topic must not be empty")]
    EmptyTopic,
    #[error("no heading precedes the cursor")]
    NoGoverningHeading,
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Policy knobs shared by all assistant operations.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistOptions {
    /// Deepest heading level the host renders; structure output is clamped
    /// to it at classification time.
    pub heading_cap: u8,
    pub merge: MergePolicy,
    pub structure_params: GenerationParams,
    pub content_params: GenerationParams,
}

impl Default for AssistOptions {
    fn default() -> Self {
        Self {
            heading_cap: DEFAULT_HEADING_CAP,
            merge: MergePolicy::default(),
            structure_params: GenerationParams::structure(),
            content_params: GenerationParams::content(),
        }
    }
}

/// The generate-then-merge orchestrator.
///
/// At most one generation request runs at a time: a request in flight
/// blocks triggering another one (a boolean flag, not a queue), mirroring
/// the single user-triggered action the UI allows.
pub struct Assistant<G: GenerationService> {
    service: G,
    options: AssistOptions,
    in_flight: bool,
}

impl<G: GenerationService> Assistant<G> {
    pub fn new(service: G) -> Self {
        Self::with_options(service, AssistOptions::default())
    }

    pub fn with_options(service: G, options: AssistOptions) -> Self {
        Self {
            service,
            options,
            in_flight: false,
        }
    }

    pub fn options(&self) -> &AssistOptions {
        &self.options
    }

    /// True while a generation request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Generate a fresh outline for `topic` and place it per `placement`.
    pub fn generate_structure<H: DocumentHost>(
        &mut self,
        host: &mut H,
        topic: &str,
        placement: StructurePlacement,
    ) -> Result<MergeReport, AssistError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(AssistError::EmptyTopic);
        }

        let params = self.options.structure_params.clone();
        let blob = self.call_service(&structure_prompt(topic), &params)?;

        let classifier = LineClassifier::new(self.options.heading_cap);
        let blocks = classifier.parse_blob(&blob);
        let report = match placement {
            StructurePlacement::Replace => replace_document(host, blocks)?,
            StructurePlacement::Append => append_blocks(host, blocks)?,
        };
        Ok(report)
    }

    /// Fill body content into the document.
    ///
    /// With heading structure present this becomes a targeted merge:
    /// `targets` restricts which headings are filled (all headings up to the
    /// merge policy's depth cutoff otherwise), and `focus` adds an optional
    /// emphasis to the instruction. Without structure the result is
    /// freeform prose appended at the end, and `focus` doubles as the
    /// mandatory topic.
    pub fn fill_content<H: DocumentHost>(
        &mut self,
        host: &mut H,
        targets: Option<&[String]>,
        focus: Option<&str>,
    ) -> Result<MergeReport, AssistError> {
        let snapshot = host.enumerate();
        let outline = Outline::analyze(&snapshot);
        let params = self.options.content_params.clone();

        if outline.has_structure {
            let instruction = content_prompt(&outline, targets.unwrap_or(&[]), focus);
            let blob = self.call_service(&instruction, &params)?;
            return Ok(targeted_merge(host, &blob, targets, &self.options.merge));
        }

        let topic = focus.map(str::trim).unwrap_or_default();
        if topic.is_empty() {
            return Err(AssistError::EmptyTopic);
        }
        let blob = self.call_service(&freeform_content_prompt(topic), &params)?;
        Ok(append_blocks(host, body_to_paragraphs(&blob))?)
    }

    /// Continue the prose under the heading governing the cursor, inserting
    /// the result right after the cursor's block.
    pub fn continue_writing<H: DocumentHost>(
        &mut self,
        host: &mut H,
    ) -> Result<MergeReport, AssistError> {
        let snapshot = host.enumerate();
        let outline = Outline::analyze(&snapshot);

        let cursor = host.cursor_position()?;
        let position = snapshot
            .index_of(&cursor.block_id)
            .ok_or(HostError::UnknownBlock(cursor.block_id.clone()))?;
        let heading = outline
            .governing_heading(position)
            .ok_or(AssistError::NoGoverningHeading)?;

        let context = content_under(&snapshot, heading);
        let params = self.options.content_params.clone();
        let blob = self.call_service(&continue_prompt(heading, &context), &params)?;
        Ok(continue_at_cursor(host, &blob)?)
    }

    fn call_service(
        &mut self,
        instruction: &str,
        params: &GenerationParams,
    ) -> Result<String, AssistError> {
        if self.in_flight {
            return Err(AssistError::RequestInFlight);
        }
        self.in_flight = true;
        let result = self.service.generate(instruction, params);
        self.in_flight = false;
        Ok(result?)
    }

    #[cfg(test)]
    fn set_in_flight(&mut self, value: bool) {
        self.in_flight = value;
    }
}
