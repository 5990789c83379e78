//! Layout inspector: restore a saved dock layout with placeholder content
//! and print where every item lands.

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use dockspace::cli::CliArgs;
use dockspace::config::DockConfig;
use dockspace::model::{ContentSpec, DockContainer, HostKind};
use dockspace::persist::{load_layout, read_layout_file, save_layout, write_layout_file, ContentRecord};

fn main() -> Result<()> {
    dockspace::tracing::init();

    let startup = CliArgs::parse().into_config().map_err(|e| anyhow!(e))?;
    let config = DockConfig::load();

    let doc = read_layout_file(&startup.layout_path)?;
    let mut container = DockContainer::with_config(&config);
    container.set_bounds(startup.bounds);

    // Every saved item comes back as a bare placeholder of the same name
    let mut placeholder = |record: &ContentRecord| {
        Some(ContentSpec::new(record.name.clone()).type_tag(record.type_tag.clone()))
    };
    let report = load_layout(&mut container, &doc, Some(&mut placeholder))
        .with_context(|| format!("Failed to restore {}", startup.layout_path.display()))?;

    for name in &report.skipped {
        println!("skipped  {}", name);
    }
    print_layout(&container);

    if let Some(path) = &startup.save_path {
        write_layout_file(path, &save_layout(&container))?;
    }

    if startup.validate {
        let issues = container.validate();
        if !issues.is_clean() {
            eprint!("{}", issues);
            return Err(anyhow!("layout has {} invariant violation(s)", issues.issues.len()));
        }
        println!("layout is valid");
    }
    Ok(())
}

fn print_layout(container: &DockContainer) {
    for host in container.hosts() {
        let label = match host.kind {
            HostKind::Main => "main".to_string(),
            HostKind::Floating(id) => format!("floating #{}", id.0),
            HostKind::AutoHide(site) => format!("auto-hide {}", site),
        };
        if container.all_content_in(host.id).next().is_none() {
            continue;
        }
        println!("{}{}", label, if host.is_shown() { "" } else { " (hidden)" });

        for (pane, rect) in container.pane_rects(host.id) {
            let Some(p) = container.pane(pane) else {
                continue;
            };
            let address = container
                .pane_address(pane)
                .map(|a| a.to_string())
                .unwrap_or_default();
            let names: Vec<String> = p
                .content
                .iter()
                .filter_map(|c| container.content(*c))
                .map(|c| {
                    if p.visible == Some(c.id) {
                        format!("[{}]", c.persist_name)
                    } else {
                        c.persist_name.clone()
                    }
                })
                .collect();
            println!(
                "  {:<20} {:>6.0},{:<6.0} {:>6.0}x{:<6.0} {}",
                address,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                names.join(" ")
            );
        }
    }
}
