//! Headless host driving a router through a push, a back gesture and a pop
//!
//! Run with `RUST_LOG=passage_core=debug` to see instance lifecycle events.

use anyhow::Result;
use passage_core::{GestureEvent, Route, Router, RouterConfig, RouterContext, RouterHandle};
use passage_layout::{Constraints, Placement, ScreenContent, Size, StackLayout};
use std::collections::VecDeque;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum DemoScreen {
    Inbox,
    Message { id: u32 },
}

/// Content that just remembers the title it was created with
struct TextContent;

impl ScreenContent<DemoScreen> for TextContent {
    type Node = String;

    fn create(&mut self, route: &Route<DemoScreen>) -> String {
        match route {
            Route::Sentinel => "(blank)".to_string(),
            Route::Screen(DemoScreen::Inbox) => "Inbox".to_string(),
            Route::Screen(DemoScreen::Message { id }) => format!("Message {id}"),
        }
    }

    fn measure(&mut self, _node: &mut String, constraints: Constraints) -> Size {
        constraints.max
    }

    fn place(&mut self, _node: &mut String, _placement: &Placement<DemoScreen>) {}
}

const VIEWPORT: Size = Size::new(390.0, 844.0);
const DT: f32 = 1.0 / 60.0;

fn print_frame(label: &str, frame: usize, placements: &[Placement<DemoScreen>]) {
    let screens: Vec<String> = placements
        .iter()
        .map(|p| {
            format!(
                "{} a={:.2} s={:.3} x={:.1}{}",
                p.route,
                p.transform.alpha,
                p.transform.scale,
                p.transform.translation_x,
                if p.transform.is_clipped() { " clip" } else { "" }
            )
        })
        .collect();
    println!("[{label} {frame:>3}] {}", screens.join(" | "));
}

fn run_frames(
    label: &str,
    handle: &RouterHandle<DemoScreen>,
    layout: &mut StackLayout<DemoScreen, TextContent>,
    source: &mut VecDeque<GestureEvent>,
) -> Result<()> {
    for frame in 0..600 {
        // One gesture sample per frame, like a platform callback would deliver
        if let Some(event) = source.pop_front() {
            handle.handle_gesture(event)?;
        }
        let summary = handle.frame(DT)?;
        for instance in &summary.disposed {
            println!("[{label} {frame:>3}] disposed {}", instance.route());
        }

        let placements = layout.layout_handle(handle, VIEWPORT)?;
        if frame % 6 == 0 {
            print_frame(label, frame, &placements);
        }
        if !summary.active && source.is_empty() {
            break;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => RouterConfig::load(path)?,
        None => RouterConfig::default(),
    };
    let handle = RouterHandle::new(Router::with_config(config)?);
    let mut layout = StackLayout::new(TextContent, 24.0);
    let mut idle = VecDeque::new();

    RouterContext::provide(&handle, || -> Result<()> {
        let router = RouterContext::current::<DemoScreen>();
        router.go(DemoScreen::Inbox)?;
        run_frames("push", &handle, &mut layout, &mut idle)?;

        router.go(DemoScreen::Message { id: 7 })?;
        run_frames("push", &handle, &mut layout, &mut idle)?;

        // Drag halfway, let go, then drag all the way and commit
        let mut cancelled: VecDeque<_> = [0.1, 0.25, 0.4, 0.5]
            .into_iter()
            .map(GestureEvent::Progressed)
            .chain([GestureEvent::Cancelled])
            .collect();
        cancelled.push_front(GestureEvent::Started);
        run_frames("cancel", &handle, &mut layout, &mut cancelled)?;

        let mut committed: VecDeque<_> = [0.2, 0.45, 0.7, 0.9]
            .into_iter()
            .map(GestureEvent::Progressed)
            .chain([GestureEvent::Committed])
            .collect();
        committed.push_front(GestureEvent::Started);
        run_frames("commit", &handle, &mut layout, &mut committed)?;

        router.pop()?;
        run_frames("pop", &handle, &mut layout, &mut idle)?;
        Ok(())
    })?;

    println!(
        "done: current = {}, retained content = {}",
        handle.current()?,
        layout.retained_len()
    );
    layout.clear();
    Ok(())
}
