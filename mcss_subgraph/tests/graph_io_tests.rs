mod graph_io {
    use mcss_subgraph::{
        Atom, BondOrder, GraphError, LoadError, MolecularGraph, RingInfo, canonical_key, load_graphs_from,
        save_graphs_to, to_canonical_string,
    };
    use rstest::rstest;

    lazy_static::lazy_static! {
        static ref RING_FAMILY: Vec<MolecularGraph> =
            load_graphs_from(mcss_common::fixtures_dir().join("ring_family.json")).unwrap();
    }

    #[test]
    fn ring_family_has_one_ring_each() {
        for g in RING_FAMILY.iter() {
            let rings = RingInfo::perceive(g);
            assert_eq!(rings.ring_count(), 1, "{:?}", g.name());
            assert_eq!(rings.ring_atom_count(), 6, "{:?}", g.name());
        }
    }

    #[test]
    fn canonical_string_of_cyclohexane() {
        assert_eq!(to_canonical_string(&RING_FAMILY[0]).unwrap(), "C1CCCCC1");
    }

    #[test]
    fn save_then_load_keeps_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        save_graphs_to(&path, &RING_FAMILY).unwrap();
        let back = load_graphs_from(&path).unwrap();
        assert_eq!(back, *RING_FAMILY);
        assert_eq!(canonical_key(&back[1]), canonical_key(&RING_FAMILY[1]));
    }

    #[rstest]
    #[case::bad_symbol(r#"[{"atoms":[{"symbol":"x"}]}]"#)]
    #[case::self_loop(r#"[{"atoms":[{"symbol":"C"}],"bonds":[{"a":0,"b":0}]}]"#)]
    #[case::missing_atom(r#"[{"atoms":[{"symbol":"C"}],"bonds":[{"a":0,"b":3}]}]"#)]
    #[case::duplicate(r#"[{"atoms":[{"symbol":"C"},{"symbol":"O"}],"bonds":[{"a":0,"b":1},{"a":1,"b":0}]}]"#)]
    #[case::not_json("atoms")]
    fn invalid_files_fail_to_parse(#[case] text: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, text).unwrap();
        assert!(matches!(load_graphs_from(&path), Err(LoadError::Parse { .. })));
    }

    #[test]
    fn bond_order_defaults_to_single() {
        let g: MolecularGraph =
            serde_json::from_str(r#"{"atoms":[{"symbol":"C"},{"symbol":"N","charge":1}],"bonds":[{"a":0,"b":1}]}"#)
                .unwrap();
        assert_eq!(g.bond_between(0, 1), Some(BondOrder::Single));
        assert_eq!(g.atom(1), Some(&Atom::new("N").with_charge(1)));
    }

    #[test]
    fn validation_errors_name_the_atom() {
        let err = MolecularGraph::from_parts([Atom::new("C"), Atom::new("")], []).unwrap_err();
        assert_eq!(
            err,
            GraphError::InvalidSymbol {
                index: 1,
                symbol: String::new()
            }
        );
    }
}
