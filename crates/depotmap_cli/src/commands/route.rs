//! Route command implementation.

use super::inspect::PathView;
use super::open_map;
use depotmap_core::{CoreError, GraphRepository, HouseId, Route, ShortestPathEngine, TracingProgress};
use serde::Serialize;
use std::error::Error;
use std::path::Path;

/// A found route as shown to the user.
#[derive(Debug, Serialize)]
pub struct RouteReport {
    /// Origin house.
    pub origin: u32,
    /// Destination house.
    pub target: u32,
    /// Label of the destination.
    pub distance: i64,
    /// Sum of the weights along the route.
    pub cost: i64,
    /// Paths in travel order.
    pub paths: Vec<PathView>,
}

/// Runs the route command.
///
/// An unreachable destination is reported, not treated as a failure.
pub fn run(
    path: &Path,
    from: u32,
    target: u32,
    allow_orphans: bool,
    format: &str,
) -> Result<(), Box<dyn Error>> {
    let repo = open_map(path)?;

    let orphans = repo.orphans();
    if !orphans.is_empty() && !allow_orphans {
        let name = repo
            .house_by_id(orphans[0])
            .map_or_else(String::new, |h| h.name().to_string());
        return Err(format!(
            "Orphan detected ({name}, {}). Connect it or pass --allow-orphans",
            orphans[0]
        )
        .into());
    }

    let mut engine = ShortestPathEngine::with_progress(TracingProgress);
    let route = match engine.search(&repo, HouseId::new(from), HouseId::new(target)) {
        Ok(route) => route,
        Err(e @ CoreError::Unreachable { .. }) => {
            println!("Destination unreachable: {e}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let report = report(&repo, &route, engine.route_cost(&repo));
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_text_output(&repo, &report),
    }
    Ok(())
}

fn report(repo: &GraphRepository, route: &Route, cost: i64) -> RouteReport {
    RouteReport {
        origin: route.origin.as_u32(),
        target: route.target.as_u32(),
        distance: route.distance,
        cost,
        paths: route
            .paths
            .iter()
            .filter_map(|&id| repo.path_by_id(id))
            .map(PathView::from)
            .collect(),
    }
}

fn print_text_output(repo: &GraphRepository, report: &RouteReport) {
    let name = |id: u32| {
        repo.house_by_id(HouseId::new(id))
            .map_or_else(|| format!("#{id}"), |h| h.name().to_string())
    };

    println!(
        "Route {} -> {} (distance {}, cost {})",
        name(report.origin),
        name(report.target),
        report.distance,
        report.cost
    );
    for path in &report.paths {
        println!(
            "  [{}] {} -> {} weight {}",
            path.id,
            name(path.start),
            name(path.end),
            path.weight
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depotmap_core::{Config, House, Path as MapPath};

    #[test]
    fn report_lists_paths_in_travel_order() {
        let mut repo = GraphRepository::in_memory(Config::default()).unwrap();
        let a = repo.add_house(House::new("a", 0, 0)).unwrap().unwrap();
        let b = repo.add_house(House::new("b", 0, 0)).unwrap().unwrap();
        repo.add_path(MapPath::new(a, b, 2)).unwrap();
        repo.add_path(MapPath::new(HouseId::DEPOT, a, 5)).unwrap();

        let mut engine = ShortestPathEngine::new();
        let route = engine.search(&repo, HouseId::DEPOT, b).unwrap();
        let report = report(&repo, &route, engine.route_cost(&repo));

        let hops: Vec<_> = report.paths.iter().map(|p| (p.start, p.end)).collect();
        assert_eq!(hops, vec![(0, 1), (1, 2)]);
        assert_eq!((report.distance, report.cost), (7, 7));
    }
}
