mod helper;

use axum::{body::Body, http::Request, http::StatusCode};
use helper::{v1, Mocks};
use rstest::rstest;
use tower::ServiceExt;

#[tokio::test]
async fn health_check_needs_no_session() -> anyhow::Result<()> {
    let req = Request::get(v1("/health")).body(Body::empty())?;
    let res = Mocks::default().into_router().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[rstest]
#[case(true, StatusCode::OK)]
#[case(false, StatusCode::INTERNAL_SERVER_ERROR)]
#[tokio::test]
async fn health_check_db(
    #[case] reachable: bool,
    #[case] expected: StatusCode,
) -> anyhow::Result<()> {
    let mut mocks = Mocks::default();
    mocks
        .health
        .expect_check_db()
        .returning(move || reachable);

    let req = Request::get(v1("/health/db")).body(Body::empty())?;
    let res = mocks.into_router().oneshot(req).await?;
    assert_eq!(res.status(), expected);
    Ok(())
}
