//! Graph report commands.

use crate::cli::{AnchorsArgs, ClustersArgs, CoresArgs, HubsArgs, NeighborsArgs};
use crate::commands::{names_for, resolve_card};
use crate::error::Result;
use crate::output::Formatter;
use manaweave_domain::traits::CardCatalog;
use manaweave_graph::{
    AnchorQuery, ClusterQuery, CoreQuery, GraphAnalyzer, GraphConfig, HubQuery,
};
use manaweave_store::SqliteStore;

/// Execute the clusters command.
pub async fn execute_clusters(
    args: ClustersArgs,
    store: &SqliteStore,
    config: &GraphConfig,
    formatter: &Formatter,
) -> Result<()> {
    let query = cluster_query(&args, &config.clusters);
    let clusters = GraphAnalyzer::new(store).clusters(&query)?;
    let names = names_for(store, clusters.iter().flat_map(|c| c.members.iter().copied()))?;
    println!("{}", formatter.format_clusters(&clusters, &names)?);
    Ok(())
}

/// Execute the hubs command.
pub async fn execute_hubs(
    args: HubsArgs,
    store: &SqliteStore,
    config: &GraphConfig,
    formatter: &Formatter,
) -> Result<()> {
    let query = hub_query(&args, &config.hubs);
    let hubs = GraphAnalyzer::new(store).hubs(&query)?;
    let names = names_for(store, hubs.iter().map(|h| h.id))?;
    println!("{}", formatter.format_hubs(&hubs, &names)?);
    Ok(())
}

/// Execute the cores command.
pub async fn execute_cores(
    args: CoresArgs,
    store: &SqliteStore,
    config: &GraphConfig,
    formatter: &Formatter,
) -> Result<()> {
    let query = core_query(&args, &config.cores);
    let cores = GraphAnalyzer::new(store).deck_cores(&query)?;
    let names = names_for(store, cores.iter().flat_map(|c| c.members.iter().copied()))?;
    println!("{}", formatter.format_cores(&cores, &names)?);
    Ok(())
}

/// Execute the anchors command.
pub async fn execute_anchors(
    args: AnchorsArgs,
    store: &SqliteStore,
    config: &GraphConfig,
    formatter: &Formatter,
) -> Result<()> {
    let query = anchor_query(&args, &config.anchors);
    let anchors = GraphAnalyzer::new(store).anchors(&query)?;
    let names = names_for(store, anchors.iter().map(|a| a.id))?;
    println!("{}", formatter.format_anchors(&anchors, &names)?);
    Ok(())
}

/// Execute the neighbors command.
pub async fn execute_neighbors(
    args: NeighborsArgs,
    store: &SqliteStore,
    formatter: &Formatter,
) -> Result<()> {
    let card = resolve_card(store, &args.card)?;
    let neighbors = GraphAnalyzer::new(store).neighbors(card.id, args.min_score)?;
    let names = names_for(store, neighbors.iter().map(|(id, _)| *id))?;
    println!("{}", formatter.format_neighbors(&neighbors, &names)?);
    Ok(())
}

/// Execute the status command.
pub async fn execute_status(store: &SqliteStore, formatter: &Formatter) -> Result<()> {
    let total_cards = store.card_count()?;
    let analyzed_cards = store.analyzed_count()?;
    let status = GraphAnalyzer::new(store).status(total_cards, analyzed_cards)?;

    let names = match &status.top_edge {
        Some(top) => names_for(store, [top.pair.low(), top.pair.high()])?,
        None => Default::default(),
    };
    println!("{}", formatter.format_status(&status, &names)?);
    Ok(())
}

fn cluster_query(args: &ClustersArgs, base: &ClusterQuery) -> ClusterQuery {
    ClusterQuery {
        min_score: args.min_score.unwrap_or(base.min_score),
        min_size: args.min_size.unwrap_or(base.min_size),
    }
}

fn hub_query(args: &HubsArgs, base: &HubQuery) -> HubQuery {
    HubQuery {
        min_score: args.min_score.unwrap_or(base.min_score),
        min_edges: args.min_edges.unwrap_or(base.min_edges),
        ..base.clone()
    }
}

fn core_query(args: &CoresArgs, base: &CoreQuery) -> CoreQuery {
    CoreQuery {
        min_score: args.min_score.unwrap_or(base.min_score),
        min_size: args.min_size.unwrap_or(base.min_size),
    }
}

fn anchor_query(args: &AnchorsArgs, base: &AnchorQuery) -> AnchorQuery {
    AnchorQuery {
        focus: args.focus.unwrap_or(base.focus),
        min_score: args.min_score.unwrap_or(base.min_score),
        limit: args.limit.unwrap_or(base.limit),
        ..base.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manaweave_graph::AnchorFocus;

    #[test]
    fn test_queries_fall_back_to_config() {
        let config = GraphConfig::default();
        let query = cluster_query(
            &ClustersArgs {
                min_score: None,
                min_size: Some(4),
            },
            &config.clusters,
        );
        assert_eq!(query.min_score, config.clusters.min_score);
        assert_eq!(query.min_size, 4);

        let query = hub_query(
            &HubsArgs {
                min_score: Some(8.0),
                min_edges: None,
            },
            &config.hubs,
        );
        assert_eq!(query.min_score, 8.0);
        assert_eq!(query.min_edges, config.hubs.min_edges);
        assert_eq!(query.tribal_floor, config.hubs.tribal_floor);
    }

    #[test]
    fn test_anchor_query_keeps_edge_limit() {
        let base = AnchorQuery {
            edge_limit: 50,
            ..Default::default()
        };
        let query = anchor_query(
            &AnchorsArgs {
                focus: Some(AnchorFocus::Tribal),
                min_score: None,
                limit: Some(5),
            },
            &base,
        );
        assert_eq!(query.focus, AnchorFocus::Tribal);
        assert_eq!(query.edge_limit, 50);
        assert_eq!(query.limit, 5);
        assert_eq!(query.min_score, base.min_score);
    }
}
