//! One generation run end to end, plus the state it leaves behind.
//!
//! A [`Session`] holds the latest plan. Every regeneration swaps the whole
//! plan out; nothing from the previous result is merged in.

use std::path::PathBuf;

use tracing::warn;

use crate::map::{write_route_map, MapError};
use crate::orchestrator::{PlanError, PlanOrchestrator, TripRequest};
use crate::place::{Destination, Itinerary};
use crate::reference::destination_dir;
use crate::report::{RenderError, ReportRenderer};
use crate::route_url::route_url;
use crate::traits::{GenerationService, ReferenceSource};

/// Result of a successful generation.
///
/// The itinerary is always present; the document and map are best-effort
/// and carry their failure instead of a path when rendering went wrong.
#[derive(Debug)]
pub struct GeneratedPlan {
    pub destination: Destination,
    pub itinerary: Itinerary,
    pub route_url: Option<String>,
    pub document: Result<PathBuf, RenderError>,
    pub map: Result<PathBuf, MapError>,
}

impl GeneratedPlan {
    pub fn document_path(&self) -> Option<&PathBuf> {
        self.document.as_ref().ok()
    }
}

/// Wires the orchestrator to the renderers.
pub struct TourGuide<G, R> {
    orchestrator: PlanOrchestrator<G, R>,
    renderer: ReportRenderer,
    map_root: PathBuf,
}

impl<G, R> TourGuide<G, R>
where
    G: GenerationService,
    R: ReferenceSource,
{
    /// `map_root` is the base directory; maps land in the destination's
    /// reference folder beneath it.
    pub fn new(
        orchestrator: PlanOrchestrator<G, R>,
        renderer: ReportRenderer,
        map_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            orchestrator,
            renderer,
            map_root: map_root.into(),
        }
    }

    /// Request, order, then render. Only planning failures abort.
    pub fn generate(&self, request: &TripRequest) -> Result<GeneratedPlan, PlanError> {
        let itinerary = self.orchestrator.plan(request)?;
        let destination = request.destination.clone();

        let map_dir = destination_dir(&self.map_root, &destination);
        let title = format!("{} recommended route", destination.city);
        let map = write_route_map(&itinerary, &title, &map_dir);
        if let Err(err) = &map {
            warn!(error = %err, "route map not written");
        }

        let document = self.renderer.render(&itinerary, &destination);

        Ok(GeneratedPlan {
            route_url: route_url(&itinerary),
            destination,
            itinerary,
            document,
            map,
        })
    }
}

#[derive(Debug, Default)]
pub struct Session {
    plan: Option<GeneratedPlan>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plan(&self) -> Option<&GeneratedPlan> {
        self.plan.as_ref()
    }

    /// Runs a generation and replaces the current plan with its result.
    ///
    /// On failure the previous plan is left as it was.
    pub fn regenerate<G, R>(
        &mut self,
        guide: &TourGuide<G, R>,
        request: &TripRequest,
    ) -> Result<&GeneratedPlan, PlanError>
    where
        G: GenerationService,
        R: ReferenceSource,
    {
        let plan = guide.generate(request)?;
        Ok(self.plan.insert(plan))
    }

    /// Forgets the current plan.
    pub fn reset(&mut self) {
        self.plan = None;
    }
}
