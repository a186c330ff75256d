use magic_counter::{LifecycleState, Outcome, Venue};

mod utils;

#[tokio::test]
async fn full_delegation_cycle() {
    let controller = utils::controller(utils::MockChain::with_signer());
    assert_eq!(controller.state(), LifecycleState::Uninitialized);

    assert_eq!(
        controller.initialize().await.unwrap(),
        Outcome::Applied(LifecycleState::Owned(0))
    );
    for _ in 0..3 {
        controller.increment().await.unwrap();
    }
    assert_eq!(controller.state(), LifecycleState::Owned(3));

    controller.delegate().await.unwrap();
    assert_eq!(controller.state(), LifecycleState::Delegated(3));

    for _ in 0..4 {
        assert_eq!(
            controller.commit().await.unwrap(),
            Outcome::Applied(LifecycleState::Delegated(3))
        );
    }

    controller.undelegate_and_increment().await.unwrap();
    assert_eq!(controller.state(), LifecycleState::Owned(4));

    let ledger = utils::chain(&controller).ledger();
    assert_eq!(ledger.count, Some(4));
    assert!(!ledger.delegated);
}

#[tokio::test]
async fn undelegate_counts_from_last_delegate() {
    for commits in [0usize, 1, 5] {
        let controller = utils::controller(utils::MockChain::with_signer());
        controller.initialize().await.unwrap();
        controller.increment().await.unwrap();
        controller.delegate().await.unwrap();
        let at_delegate = controller.state().count();

        for _ in 0..commits {
            controller.commit().await.unwrap();
        }
        controller.undelegate_and_increment().await.unwrap();

        assert_eq!(controller.state(), LifecycleState::Owned(at_delegate + 1));
    }
}

#[tokio::test]
async fn delegate_round_trip_matches_plain_increment() {
    let plain = utils::controller(utils::MockChain::with_signer());
    plain.initialize().await.unwrap();
    plain.increment().await.unwrap();
    plain.increment().await.unwrap();

    let delegated = utils::controller(utils::MockChain::with_signer());
    delegated.initialize().await.unwrap();
    delegated.increment().await.unwrap();
    delegated.delegate().await.unwrap();
    delegated.undelegate_and_increment().await.unwrap();

    assert_eq!(plain.state(), delegated.state());
}

#[tokio::test]
async fn instructions_go_to_the_owning_venue() {
    let controller = utils::controller(utils::MockChain::with_signer());
    controller.initialize().await.unwrap();
    controller.increment().await.unwrap();
    controller.delegate().await.unwrap();
    controller.commit().await.unwrap();
    controller.undelegate_and_increment().await.unwrap();

    let venues: Vec<Venue> = utils::chain(&controller)
        .submitted()
        .into_iter()
        .map(|(venue, _)| venue)
        .collect();
    assert_eq!(
        venues,
        vec![
            Venue::Base,
            Venue::Base,
            Venue::Base,
            Venue::Ephemeral,
            Venue::Ephemeral
        ]
    );
}

#[tokio::test]
async fn view_tracks_delegation() {
    let controller = utils::controller(utils::MockChain::with_signer());
    controller.initialize().await.unwrap();
    controller.increment().await.unwrap();
    controller.delegate().await.unwrap();

    let view = controller.view();
    assert_eq!(view.count, 1);
    assert!(view.delegated);
    assert!(view.wallet_connected);
    assert!(!view.busy);
    assert!(view
        .available
        .contains(&magic_counter::Operation::Commit));
    assert!(!view
        .available
        .contains(&magic_counter::Operation::Increment));
}
