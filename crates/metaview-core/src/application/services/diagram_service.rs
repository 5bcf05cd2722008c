//! Diagram service - remote render dispatch.
//!
//! Sends diagram text to the renderer in a background task and delivers the
//! result, or the failure message, to a UI slot. No retry, no validation.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use crate::application::ports::{
    DiagramRenderer, Presenter, RenderRequest, SlotContent, SlotId, SlotSink,
};
use crate::application::ports::output::{PLANTUML, SVG};
use crate::domain::{DiagramBuilder, DiagramDm, DiagramText, DisplayModel};

/// Renders diagrams into slots.
#[derive(Clone)]
pub struct DiagramService {
    renderer: Arc<dyn DiagramRenderer>,
    slots: Arc<dyn SlotSink>,
    builder: DiagramBuilder,
    diagram_type: String,
    output_format: String,
}

impl DiagramService {
    pub fn new(renderer: Arc<dyn DiagramRenderer>, slots: Arc<dyn SlotSink>) -> Self {
        Self {
            renderer,
            slots,
            builder: DiagramBuilder::new(),
            diagram_type: PLANTUML.into(),
            output_format: SVG.into(),
        }
    }

    pub fn with_format(
        mut self,
        diagram_type: impl Into<String>,
        output_format: impl Into<String>,
    ) -> Self {
        self.diagram_type = diagram_type.into();
        self.output_format = output_format.into();
        self
    }

    /// Diagram text for an aggregated type, if the domain type has arrived.
    pub fn build(&self, dm: &DiagramDm) -> Option<DiagramText> {
        let class = dm.meta_class()?;
        Some(self.builder.build(&class, dm.layout()))
    }

    /// Render `text` in the background and put the outcome into `slot`.
    ///
    /// The returned handle may be ignored.
    pub fn generate_diagram(&self, text: DiagramText, slot: SlotId) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move { service.render_into(&text, &slot).await })
    }

    /// Render `text` and deliver the outcome to `slot`, in the caller's task.
    #[instrument(skip_all, fields(slot = %slot))]
    pub async fn render_into(&self, text: &DiagramText, slot: &SlotId) {
        let request =
            RenderRequest::new(text).with_format(self.diagram_type.clone(), self.output_format.clone());
        let content = match self.renderer.render(&request).await {
            Ok(markup) => {
                info!(bytes = markup.len(), "Diagram rendered");
                SlotContent::Markup(markup)
            }
            Err(e) => {
                error!(error = %e, "Diagram rendering failed");
                SlotContent::Error(e.to_string())
            }
        };
        if let Err(e) = self.slots.update(slot, content) {
            error!(error = %e, "Slot update failed");
        }
    }

    /// Build and dispatch the diagram for an aggregated type.
    pub fn present_type(&self, dm: &DiagramDm, slot: &SlotId) -> Option<JoinHandle<()>> {
        let text = self.build(dm)?;
        Some(self.generate_diagram(text, slot.clone()))
    }
}

/// Presents a [`DiagramDm`] by rendering its diagram into one slot.
pub struct DiagramPresenter {
    service: DiagramService,
    slot: SlotId,
    task: Option<JoinHandle<()>>,
}

impl DiagramPresenter {
    pub fn new(service: DiagramService, slot: SlotId) -> Self {
        Self {
            service,
            slot,
            task: None,
        }
    }

    /// The render task started by the presentation, if any.
    pub fn take_task(&mut self) -> Option<JoinHandle<()>> {
        self.task.take()
    }
}

impl Presenter<DiagramDm> for DiagramPresenter {
    fn present(&mut self, model: &DiagramDm) {
        self.task = self.service.present_type(model, &self.slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::application::ports::{MockDiagramRenderer, MockSlotSink};
    use crate::domain::{DomainType, Member, TransferObject};

    fn diagram_dm() -> DiagramDm {
        let mut dm = DiagramDm::without_member_types();
        dm.add_data(TransferObject::DomainType(
            DomainType::new("demo.Customer").with_member(Member::property("name")),
        ));
        dm
    }

    #[tokio::test]
    async fn rendered_markup_reaches_the_slot() {
        let mut renderer = MockDiagramRenderer::new();
        renderer
            .expect_render()
            .withf(|req| {
                req.diagram_type == "plantuml"
                    && req.output_format == "svg"
                    && req.diagram_source.starts_with("@startuml\npackage demo {")
            })
            .times(1)
            .returning(|_| Ok("<svg/>".into()));

        let mut slots = MockSlotSink::new();
        slots
            .expect_update()
            .withf(|slot, content| {
                slot.as_str() == "diagram" && *content == SlotContent::Markup("<svg/>".into())
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = DiagramService::new(Arc::new(renderer), Arc::new(slots));
        service
            .present_type(&diagram_dm(), &SlotId::new("diagram"))
            .unwrap()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn render_failure_is_shown_in_the_slot() {
        let mut renderer = MockDiagramRenderer::new();
        renderer.expect_render().returning(|_| {
            Err(ApplicationError::RenderingFailed {
                reason: "HTTP 400".into(),
            }
            .into())
        });

        let mut slots = MockSlotSink::new();
        slots
            .expect_update()
            .withf(|_, content| content.is_error() && content.as_str().contains("HTTP 400"))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = DiagramService::new(Arc::new(renderer), Arc::new(slots));
        service
            .generate_diagram(DiagramText::new("@startuml\n@enduml"), SlotId::new("d"))
            .await
            .unwrap();
    }

    #[test]
    fn nothing_to_build_without_a_domain_type() {
        let service = DiagramService::new(
            Arc::new(MockDiagramRenderer::new()),
            Arc::new(MockSlotSink::new()),
        );
        assert!(service.build(&DiagramDm::new()).is_none());
    }
}
