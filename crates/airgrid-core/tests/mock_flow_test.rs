#![allow(clippy::unwrap_used)]
// End-to-end flows over the mock data layer: list → table view →
// optimistic mutation → reconcile/rollback, exactly as a list page
// drives them.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use airgrid_core::table::{SortDir, TableQuery, compute};
use airgrid_core::{
    ClientPatch, ErrorReport, Gateway, LatencyProfile, ListController, MockStore, Network,
    NetworkPatch,
};

fn quiet_gateway() -> Gateway {
    Gateway::mock(Arc::new(MockStore::seeded()), LatencyProfile::zero())
}

#[tokio::test]
async fn listing_networks_sorts_by_name_ascending_by_default() {
    let gw = quiet_gateway();
    let networks = gw.list_networks().await.unwrap();
    assert_eq!(networks.len(), 3);

    let q = TableQuery::new(10).with_sort("name", SortDir::Asc);
    let view = compute(&networks, &q);
    let names: Vec<&str> = view.rows.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["Ocean-Guest", "Ocean-IoT", "Ocean-Staff"]);
}

#[tokio::test]
async fn searching_guest_matches_exactly_one_network() {
    let gw = quiet_gateway();
    let networks = gw.list_networks().await.unwrap();

    let mut q = TableQuery::new(10).with_sort("name", SortDir::Asc);
    q.set_filter("guest");
    let view = compute(&networks, &q);

    assert_eq!(view.filtered_rows, 1);
    assert_eq!(view.rows[0].name, "Ocean-Guest");
}

#[tokio::test(start_paused = true)]
async fn toggling_enabled_is_visible_immediately_and_confirms_after_latency() {
    // real latency profile; paused time auto-advances through the sleeps
    let gw = Gateway::mock(Arc::new(MockStore::seeded()), LatencyProfile::default());

    let mut ctl: ListController<Network> = ListController::new();
    ctl.finish_load(Ok::<_, ErrorReport>(gw.list_networks().await.unwrap()));

    let before = ctl.get("net-main").unwrap().clone();
    assert!(before.enabled);

    // optimistic flip: the badge changes before any await
    let _snap = ctl
        .optimistic_patch("net-main", |n| n.enabled = false)
        .unwrap();
    assert!(!ctl.get("net-main").unwrap().enabled);
    assert!(ctl.is_mutating("net-main"));

    // remote confirm arrives after the simulated delay
    let confirmed = gw
        .update_network("net-main", NetworkPatch::enabled(false))
        .await
        .unwrap();
    ctl.commit("net-main", Some(confirmed));

    assert!(!ctl.get("net-main").unwrap().enabled);
    assert!(!ctl.is_mutating("net-main"));

    // and the store agrees on the next full load
    let reloaded = gw.get_network("net-main").await.unwrap();
    assert!(!reloaded.enabled);
}

#[tokio::test]
async fn failed_block_rolls_back_to_unblocked() {
    let gw = quiet_gateway();

    let mut ctl = ListController::new();
    ctl.finish_load(Ok::<_, ErrorReport>(gw.list_clients().await.unwrap()));

    let target = "cl-1";
    assert!(!ctl.get(target).unwrap().blocked);

    // the record vanishes behind the UI's back, so the mutation will 404
    gw.delete_client(target).await.unwrap();

    let snap = ctl
        .optimistic_patch(target, |c| c.blocked = true)
        .unwrap();
    assert!(ctl.get(target).unwrap().blocked, "optimistic flip visible");

    let err = gw
        .update_client(target, ClientPatch::blocked(true))
        .await
        .unwrap_err();
    assert_eq!(err.report().status, Some(404));

    ctl.fail(snap);
    let after = ctl.get(target).unwrap();
    assert!(!after.blocked, "rollback restores the pre-mutation state");
}

#[tokio::test]
async fn unknown_client_id_rejects_with_404_not_found() {
    let gw = quiet_gateway();
    let report = gw.get_client("cl-missing").await.unwrap_err().report();
    assert_eq!(report.status, Some(404));
    assert_eq!(report.code.as_deref(), Some("NOT_FOUND"));
}

#[tokio::test]
async fn pagination_of_the_client_fleet_covers_every_row_once() {
    let gw = quiet_gateway();
    let clients = gw.list_clients().await.unwrap();
    assert_eq!(clients.len(), 22);

    let mut q = TableQuery::new(8).with_sort("name", SortDir::Asc);
    let first = compute(&clients, &q);
    assert_eq!(first.total_pages, 3); // ceil(22 / 8)

    let mut seen: Vec<String> = Vec::new();
    for page in 1..=first.total_pages {
        q.page = page;
        let view = compute(&clients, &q);
        seen.extend(view.rows.iter().map(|c| c.id.clone()));
    }
    assert_eq!(seen.len(), 22);

    let mut dedup = seen.clone();
    dedup.sort();
    dedup.dedup();
    assert_eq!(dedup.len(), 22, "no row appears twice across pages");
}
