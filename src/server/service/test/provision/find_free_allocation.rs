use super::*;

/// Tests picking the first free allocation on the first node.
///
/// Expected: Ok(Some) with the first unassigned allocation in listing order
#[tokio::test]
async fn picks_first_unassigned_allocation() -> Result<(), AppError> {
    let panel = MockPanel::builder()
        .with_node(1, &[(10, true), (11, false), (12, false)])
        .build()
        .await
        .unwrap();
    let http_client = reqwest::Client::new();
    let config = panel_config(&panel);

    let allocation = ProvisionService::new(&http_client, &config)
        .find_free_allocation()
        .await?;

    assert_eq!(allocation.map(|a| a.id), Some(11));

    Ok(())
}

/// Tests skipping fully assigned nodes.
///
/// Verifies that nodes are scanned in order and the scan stops at the first
/// node with a free allocation.
///
/// Expected: Ok(Some) from the second node, third node never queried
#[tokio::test]
async fn skips_full_nodes() -> Result<(), AppError> {
    let panel = MockPanel::builder()
        .with_node(1, &[(10, true)])
        .with_node(2, &[(20, false)])
        .with_node(3, &[(30, false)])
        .build()
        .await
        .unwrap();
    let http_client = reqwest::Client::new();
    let config = panel_config(&panel);

    let allocation = ProvisionService::new(&http_client, &config)
        .find_free_allocation()
        .await?;

    assert_eq!(allocation.map(|a| a.id), Some(20));
    assert!(!panel
        .requests()
        .await
        .iter()
        .any(|r| r.contains("/nodes/3/allocations")));

    Ok(())
}

/// Tests following allocation pagination.
///
/// Verifies that a free allocation past the first page is found.
///
/// Expected: Ok(Some) from the second page
#[tokio::test]
async fn follows_allocation_pages() -> Result<(), AppError> {
    let panel = MockPanel::builder()
        .with_node(1, &[(10, true), (11, true), (12, false)])
        .page_size(2)
        .build()
        .await
        .unwrap();
    let http_client = reqwest::Client::new();
    let config = panel_config(&panel);

    let allocation = ProvisionService::new(&http_client, &config)
        .find_free_allocation()
        .await?;

    assert_eq!(allocation.map(|a| a.id), Some(12));
    assert!(panel
        .requests()
        .await
        .contains(&"GET /api/application/nodes/1/allocations?page=2".to_string()));

    Ok(())
}

/// Tests following node pagination.
///
/// Expected: Ok(Some) from a node listed on the second page
#[tokio::test]
async fn follows_node_pages() -> Result<(), AppError> {
    let panel = MockPanel::builder()
        .with_node(1, &[(10, true)])
        .with_node(2, &[(20, true)])
        .with_node(3, &[(30, false)])
        .page_size(2)
        .build()
        .await
        .unwrap();
    let http_client = reqwest::Client::new();
    let config = panel_config(&panel);

    let allocation = ProvisionService::new(&http_client, &config)
        .find_free_allocation()
        .await?;

    assert_eq!(allocation.map(|a| a.id), Some(30));

    Ok(())
}

/// Tests a panel where every allocation is taken.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_when_all_assigned() -> Result<(), AppError> {
    let panel = MockPanel::builder()
        .with_node(1, &[(10, true)])
        .with_node(2, &[])
        .build()
        .await
        .unwrap();
    let http_client = reqwest::Client::new();
    let config = panel_config(&panel);

    let allocation = ProvisionService::new(&http_client, &config)
        .find_free_allocation()
        .await?;

    assert!(allocation.is_none());

    Ok(())
}

/// Tests a panel that ignores the requested page.
///
/// Verifies that the scan stops after `total_pages` requests per node even when
/// every response claims to be the first page.
///
/// Expected: Ok(None) after exactly two allocation page requests
#[tokio::test]
async fn stops_when_panel_repeats_first_page() -> Result<(), AppError> {
    let panel = MockPanel::builder()
        .with_node(1, &[(10, true), (11, false)])
        .page_size(1)
        .ignore_page()
        .build()
        .await
        .unwrap();
    let http_client = reqwest::Client::new();
    let config = panel_config(&panel);

    let allocation = ProvisionService::new(&http_client, &config)
        .find_free_allocation()
        .await?;

    assert_eq!(allocation, None);
    let allocation_requests: Vec<String> = panel
        .requests()
        .await
        .into_iter()
        .filter(|r| r.contains("/nodes/1/allocations"))
        .collect();
    assert_eq!(
        allocation_requests,
        vec![
            "GET /api/application/nodes/1/allocations?page=1".to_string(),
            "GET /api/application/nodes/1/allocations?page=2".to_string(),
        ]
    );

    Ok(())
}
