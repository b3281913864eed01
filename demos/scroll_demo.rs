//! Scroll Demo - Drive a showcase page through a simulated visit
//!
//! Builds a small landing page, mounts it, then scrolls, clicks and resizes
//! while printing what changed.
//!
//! Run with: cargo run --example scroll_demo
//! More detail: RUST_LOG=spark_showcase=debug cargo run --example scroll_demo

use spark_showcase::{
    Classes, ElementId, ElementSpec, Markers, Page, PageEvent, PlayState, Showcase, ShowcaseConfig,
    Viewport,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn build_page() -> Page {
    let mut page = Page::new(Viewport::new(1280.0, 800.0));
    let root = page.root();

    let hero = page.append(root, ElementSpec::new().marker(Markers::HERO_SECTION).height(800.0));
    page.append(hero, ElementSpec::new().marker(Markers::HERO_CONTENT).height(300.0));
    page.append(hero, ElementSpec::new().id("counter").text("0").height(60.0));
    page.append(hero, ElementSpec::new().marker(Markers::CTA_BUTTON).height(48.0));
    page.append(hero, ElementSpec::new().attr("href", "#process").height(24.0));

    page.append(root, ElementSpec::new().marker(Markers::REVEAL).height(400.0));

    let grid = page.append(root, ElementSpec::new().row().gap(24.0).padding(32.0));
    for _ in 0..3 {
        page.append(
            grid,
            ElementSpec::new().marker(Markers::FEATURE_CARD).width(380.0).height(280.0),
        );
    }

    let tabs = page.append(root, ElementSpec::new().padding(32.0));
    for name in ["form", "function", "feeling"] {
        page.append(
            tabs,
            ElementSpec::new().marker(Markers::TAB_BUTTON).attr("data-tab", name).height(40.0),
        );
    }
    for name in ["form", "function", "feeling"] {
        page.append(tabs, ElementSpec::new().marker(Markers::TAB_PANEL).id(name).height(200.0));
    }

    let process = page.append(
        root,
        ElementSpec::new()
            .id("process")
            .marker(Markers::REVEAL | Markers::DESIGN_PROCESS)
            .gap(16.0),
    );
    for _ in 0..4 {
        page.append(process, ElementSpec::new().marker(Markers::TIMELINE_STEP).height(160.0));
    }

    page.append(root, ElementSpec::new().height(600.0));
    page
}

fn report(showcase: &Showcase, label: &str) {
    let page = showcase.page();
    let revealed = page
        .document_order()
        .into_iter()
        .filter(|&id| page.has_class(id, Classes::REVEALED))
        .count();
    let steps = page
        .query(Markers::TIMELINE_STEP)
        .into_iter()
        .filter(|&id| page.style(id).animation_play_state == PlayState::Running)
        .count();
    let counter = page
        .get_by_id("counter")
        .map(|id| page.text(id))
        .unwrap_or_default();

    println!(
        "[{:>5}ms] {:<22} scroll={:>6.0} revealed={} steps={} counter={}",
        showcase.now(),
        label,
        page.scroll_y(),
        revealed,
        steps,
        counter
    );
}

fn first(page: &Page, markers: Markers) -> Option<ElementId> {
    page.query(markers).first().copied()
}

fn main() -> spark_showcase::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spark_showcase=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut showcase = Showcase::mount(build_page(), ShowcaseConfig::default())?;
    report(&showcase, "mounted");

    showcase.advance_to(1200);
    report(&showcase, "counter running");

    showcase.dispatch(PageEvent::Scroll { top: 600.0 })?;
    report(&showcase, "scrolled to cards");
    showcase.advance_by(400);
    report(&showcase, "cards staggered in");

    if let Some(tab) = showcase.tabs().buttons().get(1).copied() {
        showcase.dispatch(PageEvent::Click(tab))?;
        let active = showcase.tabs().active_panel(showcase.page());
        println!("           active tab panel: {:?}", active.map(|p| p.to_string()));
    }

    let link = showcase.page().query_attr("href", |h| h.starts_with('#')).first().copied();
    if let Some(link) = link {
        showcase.dispatch(PageEvent::Click(link))?;
        showcase.advance_by(450);
        report(&showcase, "anchor to process");
        showcase.advance_by(800);
        report(&showcase, "timeline played");
    }

    if let Some(cta) = first(showcase.page(), Markers::CTA_BUTTON) {
        showcase.dispatch(PageEvent::Click(cta))?;
    }

    showcase.dispatch(PageEvent::Resize { width: 900.0, height: 700.0 })?;
    showcase.advance_by(300);
    report(&showcase, "resized");

    showcase.scroll_to_top();
    showcase.advance_by(500);
    report(&showcase, "back to top");

    let page = showcase.unmount();
    println!("unmounted; {} elements", page.len());
    Ok(())
}
