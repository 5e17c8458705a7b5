//! Onboarding Tour
//!
//! This example walks a terminal "user" through a four-step onboarding tour.
//!
//! Key concepts:
//! - Loading a tour from a JSON definition
//! - A rendering adapter that prints steps instead of drawing overlays
//! - Skipping a step whose target is not on screen
//! - Persisting progress and resuming it in a second session
//!
//! Run with: cargo run --example onboarding

use std::collections::HashSet;
use std::sync::Arc;
use tourguide::config::TourDefinition;
use tourguide::directory::TourDirectory;
use tourguide::persist::{JsonFileStore, ProgressStore};
use tourguide::render::{ElementHandle, RenderAdapter, RenderFailure, StepView, TargetResolution};
use tourguide::step::Target;
use tourguide::tour::TourCallbacks;

const DEFINITION: &str = r##"{
    "name": "onboarding",
    "options": { "skip_missing_targets": true, "persist": true },
    "steps": [
        { "content": "Welcome aboard! This short tour shows you around." },
        { "target": "#reports", "header": "Reports", "content": "Your weekly numbers live here." },
        { "target": "#search", "header": "Search", "content": "Find anything from this box.",
          "params": { "placement": "top" } },
        { "target": "#profile", "header": "Profile", "content": "Update your details here." }
    ]
}"##;

// Terminal adapter: prints each step, pretends some elements are mounted
struct Terminal {
    mounted: HashSet<&'static str>,
}

impl RenderAdapter for Terminal {
    fn resolve_target(&self, target: &Target) -> TargetResolution {
        if self.mounted.contains(target.selector()) {
            TargetResolution::Found(ElementHandle::new(target.selector().len() as u64))
        } else {
            TargetResolution::NotFound
        }
    }

    fn show_step(
        &self,
        view: &StepView<'_>,
        _element: Option<ElementHandle>,
    ) -> Result<(), RenderFailure> {
        let anchor = view
            .step
            .target()
            .map_or("center".to_string(), |t| t.to_string());
        println!(
            "  [{}/{}] {} ({}, {:?})",
            view.index + 1,
            view.total,
            view.step.header().unwrap_or("Tour"),
            anchor,
            view.placement
        );
        println!("        {}", view.step.content());

        let mut buttons = Vec::new();
        if view.buttons.previous {
            buttons.push(view.labels.previous.as_str());
        }
        if view.buttons.next {
            buttons.push(view.labels.next.as_str());
        }
        if view.buttons.skip {
            buttons.push(view.labels.skip.as_str());
        }
        if view.buttons.stop {
            buttons.push(view.labels.stop.as_str());
        }
        println!("        buttons: {}", buttons.join(" | "));
        Ok(())
    }

    fn hide_overlay(&self) {
        println!("  (overlay hidden)");
    }
}

fn callbacks() -> TourCallbacks {
    TourCallbacks::new()
        .on_start(|| println!("-> tour started"))
        .on_step_change(|old, new| println!("-> step {} -> {}", old, new))
        .on_complete(|| println!("-> tour complete"))
        .on_stop(|| println!("-> tour stopped"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let definition = TourDefinition::from_json(DEFINITION)?;
    let progress_dir = std::env::temp_dir().join("tourguide-onboarding-demo");
    let store = Arc::new(JsonFileStore::new(&progress_dir)?);
    // Start fresh on every run.
    store.remove("onboarding")?;

    let adapter = Arc::new(Terminal {
        mounted: ["#search", "#profile"].into_iter().collect(),
    });

    println!("=== Session 1 ===");
    {
        let directory = TourDirectory::new(adapter.clone()).with_store(store.clone());
        let tour = directory.load(definition.clone())?;
        tour.set_callbacks(callbacks())?;

        tour.start()?;
        // "#reports" is not mounted, so this lands on the search step.
        tour.next()?;

        println!("User navigates away mid-tour");
        directory.teardown();
    }

    println!("\n=== Session 2 ===");
    let directory = TourDirectory::new(adapter).with_store(store);
    let tour = directory.load(definition)?;
    tour.set_callbacks(callbacks())?;

    tour.start()?;
    println!("Resumed at step {:?}", tour.current_index());

    tour.next()?;
    tour.next()?;
    println!("Final status: {}", tour.status());

    Ok(())
}
