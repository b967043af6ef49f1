//! # End-to-End Discovery Rounds
//!
//! Full rounds over a simulated four-oracle network (`f_role_don = 1`):
//!
//! 1. **Happy path**: every oracle commits every deployed contract
//! 2. **Byzantine address**: one lying reader is outvoted
//! 3. **Unauthorized observation**: peers refuse the offending oracle
//! 4. **Readerless oracles**: fChain-only observations starve address quorum
//! 5. **Partial support**: cells on a thinly supported chain are omitted

#[cfg(test)]
mod tests {
    use crate::integration::network::{init_tracing, NetworkBuilder, SimNetwork};
    use contract_discovery::{ContractName, DiscoveryApi, Query};
    use shared_types::{ChainSelector, OracleId, UnknownAddress};

    const DEST: ChainSelector = ChainSelector(1);
    const SOURCE1: ChainSelector = ChainSelector(2);
    const SOURCE2: ChainSelector = ChainSelector(3);

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn with_contracts(builder: NetworkBuilder) -> NetworkBuilder {
        builder
            .deploy(ContractName::OnRamp, SOURCE1, "onramp-1")
            .deploy(ContractName::OnRamp, SOURCE2, "onramp-2")
            .deploy(ContractName::FeeQuoter, DEST, "fee-quoter-dest")
            .deploy(ContractName::FeeQuoter, SOURCE1, "fee-quoter-1")
            .deploy(ContractName::FeeQuoter, SOURCE2, "fee-quoter-2")
            .deploy(ContractName::NonceManager, DEST, "nonce-manager")
            .deploy(ContractName::RMNRemote, DEST, "rmn-remote")
            .deploy(ContractName::Router, DEST, "router")
    }

    fn fully_supported() -> NetworkBuilder {
        with_contracts(
            NetworkBuilder::new(4, DEST, 1)
                .chain_for_all(DEST, 1)
                .chain_for_all(SOURCE1, 1)
                .chain_for_all(SOURCE2, 1),
        )
    }

    fn addr(s: &str) -> UnknownAddress {
        UnknownAddress::from(s)
    }

    async fn assert_all_committed(network: &SimNetwork) {
        for idx in 0..network.nodes.len() {
            let bound = network.wait_for_commits(idx, 1).await;
            assert_eq!(bound[&ContractName::OnRamp][&SOURCE1], addr("onramp-1"));
            assert_eq!(bound[&ContractName::OnRamp][&SOURCE2], addr("onramp-2"));
            assert_eq!(bound[&ContractName::FeeQuoter].len(), 3);
            assert_eq!(bound[&ContractName::NonceManager][&DEST], addr("nonce-manager"));
            assert_eq!(bound[&ContractName::RMNRemote][&DEST], addr("rmn-remote"));
            assert_eq!(bound[&ContractName::Router][&DEST], addr("router"));
        }
    }

    // =========================================================================
    // ROUNDS
    // =========================================================================

    #[tokio::test]
    async fn test_full_round_commits_on_every_node() {
        init_tracing();
        let network = fully_supported().build();

        let observations = network.run_round().await;
        assert_eq!(observations.len(), 4);

        assert_all_committed(&network).await;
    }

    #[tokio::test]
    async fn test_byzantine_address_is_outvoted() {
        init_tracing();
        let network = fully_supported()
            .deploy_on(3, ContractName::Router, DEST, "evil-router")
            .build();

        let observations = network.run_round().await;

        // The lie is well-formed, so every peer admits it
        for idx in 0..4 {
            assert_eq!(network.admitted_by(idx, &observations).len(), 4);
        }
        assert_all_committed(&network).await;
    }

    #[tokio::test]
    async fn test_unauthorized_observation_is_rejected_by_peers() {
        init_tracing();
        let network = with_contracts(
            NetworkBuilder::new(4, DEST, 1)
                .chain_for_all(DEST, 1)
                .chain_for_all(SOURCE1, 1)
                .chain(SOURCE2, 1, &[0, 1, 2]),
        )
        .build();

        let mut observations = network.observe_all().await;
        let liar = observations
            .iter_mut()
            .find(|ao| ao.oracle_id == OracleId(3))
            .unwrap();
        liar.observation
            .addresses
            .entry(ContractName::Router)
            .or_default()
            .insert(SOURCE2, addr("router-2"));

        for idx in 0..4 {
            let admitted = network.admitted_by(idx, &observations);
            assert_eq!(admitted.len(), 3);
            assert!(admitted.iter().all(|ao| ao.oracle_id != OracleId(3)));
        }

        let err = network.nodes[0]
            .processor
            .validate_observation(None, &Query {}, &observations[3])
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("oracle 3 is not allowed to observe chain ChainSelector(3)"));

        network.outcome_all(&observations).await;
        assert_all_committed(&network).await;
    }

    #[tokio::test]
    async fn test_readerless_nodes_starve_address_quorum() {
        init_tracing();
        let network = fully_supported().without_reader(2).without_reader(3).build();

        let observations = network.run_round().await;
        assert_eq!(observations.len(), 4);
        assert!(observations[2].observation.addresses.is_empty());
        assert_eq!(observations[2].observation.f_chain.len(), 3);

        // Only two readers report addresses where three are needed
        for idx in 0..2 {
            let bound = network.wait_for_commits(idx, 1).await;
            assert_eq!(bound.len(), ContractName::ALL.len());
            assert!(bound.values().all(|by_chain| by_chain.is_empty()));
        }
        assert!(network.nodes[2].reader.is_none());
    }

    #[tokio::test]
    async fn test_thinly_supported_chain_cells_are_omitted() {
        init_tracing();
        let network = with_contracts(
            NetworkBuilder::new(4, DEST, 1)
                .chain_for_all(DEST, 1)
                .chain_for_all(SOURCE1, 1)
                .chain(SOURCE2, 1, &[0, 1]),
        )
        .build();

        network.run_round().await;

        let bound = network.wait_for_commits(0, 1).await;
        // OnRamps are read on the destination, so every node reports both
        assert_eq!(bound[&ContractName::OnRamp].len(), 2);
        // The SOURCE2 fee quoter has two reports and no agreed fChain
        assert!(bound[&ContractName::FeeQuoter].contains_key(&SOURCE1));
        assert!(!bound[&ContractName::FeeQuoter].contains_key(&SOURCE2));
    }

    #[tokio::test]
    async fn test_consecutive_rounds_recommit() {
        init_tracing();
        let network = fully_supported().build();

        network.run_round().await;
        network.wait_for_commits(0, 1).await;

        network.run_round().await;
        let bound = network.wait_for_commits(0, 2).await;
        assert_eq!(bound[&ContractName::Router][&DEST], addr("router"));
    }
}
