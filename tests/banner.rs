use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skyroll::banner::structures::{
    DrawTable, Element, ItemData, ItemType, NameError, Rarity
};
use skyroll::banner::{Banner, BannerError};

fn item(id: &str, rarity: Rarity, kind: ItemType, rate1: f64, rate2: f64) -> ItemData {
    ItemData {
        id: id.into(),
        name: id.into(),
        rarity,
        kind,
        rate1,
        rate2,
        ..Default::default()
    }
}

fn two_items() -> Banner {
    Banner::load([
        item("A", Rarity::SSRare, ItemType::Sabre, 30.0, 30.0),
        item("B", Rarity::Rare, ItemType::Sabre, 70.0, 70.0),
    ]).expect("two items make a valid banner")
}

#[test]
fn cumulative_rates_follow_feed_order() {
    let banner = Banner::load([
        item("c", Rarity::Rare, ItemType::Axe, 50.0, 10.0),
        item("a", Rarity::SSRare, ItemType::Summon, 3.0, 60.0),
        item("b", Rarity::SRare, ItemType::Bow, 47.0, 30.0),
    ]).unwrap();
    let ids = banner.items().iter().map(|item| item.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, ["c", "a", "b"]);
    let cum1 = banner.items().iter().map(|item| item.cum_rate1).collect::<Vec<_>>();
    let cum2 = banner.items().iter().map(|item| item.cum_rate2).collect::<Vec<_>>();
    assert_eq!(cum1, [50.0, 53.0, 100.0]);
    assert_eq!(cum2, [10.0, 70.0, 100.0]);
    assert_eq!(banner.total_rate(DrawTable::Normal), 100.0);
    assert_eq!(banner.total_rate(DrawTable::Guaranteed), 100.0);
}

#[test]
fn cumulative_rates_never_decrease() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for _ in 0..50 {
        let count = rng.gen_range(1..40);
        let banner = Banner::load((0..count).map(|index| item(
            &index.to_string(),
            Rarity::Rare,
            ItemType::Gun,
            rng.gen_range(0.0..5.0),
            rng.gen_range(0.001..5.0),
        ))).unwrap();
        for table in [DrawTable::Normal, DrawTable::Guaranteed] {
            let cums = banner.items().iter().map(|item| item.cum_rate(table)).collect::<Vec<_>>();
            assert!(cums.windows(2).all(|pair| pair[0] <= pair[1]));
            assert_eq!(cums.last().copied(), Some(banner.total_rate(table)));
        }
    }
}

#[test]
fn pick_includes_the_boundary() {
    let banner = two_items();
    assert_eq!(banner.pick(DrawTable::Normal, 29.9).id, "A");
    assert_eq!(banner.pick(DrawTable::Normal, 30.0).id, "A");
    assert_eq!(banner.pick(DrawTable::Normal, 30.1).id, "B");
    assert_eq!(banner.pick(DrawTable::Normal, 0.0).id, "A");
}

#[test]
fn pick_clamps_past_the_end() {
    let banner = two_items();
    assert_eq!(banner.pick(DrawTable::Normal, 100.0).id, "B");
    assert_eq!(banner.pick(DrawTable::Normal, 100.000_000_1).id, "B");
    assert_eq!(banner.pick(DrawTable::Guaranteed, 1e9).id, "B");
}

#[test]
fn pick_skips_items_without_weight() {
    let banner = Banner::load([
        item("A", Rarity::Rare, ItemType::Axe, 50.0, 0.0),
        item("B", Rarity::Rare, ItemType::Axe, 50.0, 0.0),
        item("C", Rarity::SRare, ItemType::Axe, 0.0, 100.0),
    ]).unwrap();
    assert_eq!(banner.pick(DrawTable::Guaranteed, 0.0).id, "C");
    assert_eq!(banner.pick(DrawTable::Normal, 0.0).id, "A");
    assert_eq!(banner.pick(DrawTable::Normal, 50.0).id, "A");
    assert_eq!(banner.pick(DrawTable::Normal, 100.0).id, "B");
}

#[test]
fn rejects_unusable_banners() {
    assert_eq!(Banner::load(Vec::new()), Err(BannerError::Empty));
    assert_eq!(
        Banner::load([item("A", Rarity::Rare, ItemType::Axe, 0.0, 10.0)]),
        Err(BannerError::EmptyTable(DrawTable::Normal))
    );
    assert_eq!(
        Banner::load([item("A", Rarity::Rare, ItemType::Axe, 10.0, 0.0)]),
        Err(BannerError::EmptyTable(DrawTable::Guaranteed))
    );
    assert!(matches!(
        Banner::load([
            item("A", Rarity::Rare, ItemType::Axe, 10.0, 10.0),
            item("B", Rarity::Rare, ItemType::Axe, -1.0, 10.0),
        ]),
        Err(BannerError::InvalidRate { id, .. }) if id == "B"
    ));
    assert!(matches!(
        Banner::load([item("C", Rarity::Rare, ItemType::Axe, 10.0, f64::NAN)]),
        Err(BannerError::InvalidRate { id, .. }) if id == "C"
    ));
    assert_eq!(
        BannerError::EmptyTable(DrawTable::Normal).to_string(),
        "the normal table has no weight to draw from"
    );
}

#[test]
fn finds_items_by_name() {
    let banner = Banner::load([
        ItemData {
            id: "1".into(),
            name: "Sword of  Eos".into(),
            rarity: Rarity::SSRare,
            element: Element::Light,
            kind: ItemType::Sabre,
            rate1: 1.0,
            rate2: 1.0,
            rate_up: true,
            character: Some("Eos".into()),
        },
        ItemData {
            id: "2".into(),
            name: "Eos".into(),
            rarity: Rarity::SSRare,
            element: Element::Light,
            kind: ItemType::Summon,
            rate1: 1.0,
            rate2: 1.0,
            ..Default::default()
        },
        ItemData {
            id: "3".into(),
            name: "Blade of Light".into(),
            rarity: Rarity::SRare,
            kind: ItemType::Dagger,
            rate1: 98.0,
            rate2: 98.0,
            character: Some("Zeta".into()),
            ..Default::default()
        },
    ]).unwrap();
    let found = |name: &str| banner.find(name).map(|item| item.id.as_str());
    assert_eq!(found("sword of eos"), Some("1"));
    // An exact name wins over a character
    assert_eq!(found("EOS"), Some("2"));
    assert_eq!(found("  zeta "), Some("3"));
    assert_eq!(found("blade"), Some("3"));
    assert_eq!(found("excalibur"), None);
    assert_eq!(found("   "), None);
}

#[test]
fn aggregates_rates() {
    let banner = Banner::load([
        ItemData { rate_up: true, ..item("A", Rarity::SSRare, ItemType::Sabre, 0.5, 0.5) },
        item("B", Rarity::SSRare, ItemType::Summon, 2.5, 2.5),
        ItemData { rate_up: true, ..item("C", Rarity::SRare, ItemType::Spear, 1.0, 2.0) },
        item("D", Rarity::Rare, ItemType::Spear, 96.0, 95.0),
    ]).unwrap();
    assert_eq!(banner.rarity_rate(Rarity::SSRare, DrawTable::Normal), 3.0);
    assert_eq!(banner.rarity_rate(Rarity::Rare, DrawTable::Guaranteed), 95.0);
    assert_eq!(banner.rarity_rate(Rarity::Normal, DrawTable::Normal), 0.0);
    assert_eq!(banner.featured().map(|item| item.id.as_str()).collect::<Vec<_>>(), ["A", "C"]);
    assert_eq!(banner.featured_rate(DrawTable::Guaranteed), 2.5);
}

#[test]
fn parses_item_names() {
    assert_eq!("SS Rare".parse::<Rarity>(), Ok(Rarity::SSRare));
    assert_eq!("ssr".parse::<Rarity>(), Ok(Rarity::SSRare));
    assert_eq!("S  Rare".parse::<Rarity>(), Ok(Rarity::SRare));
    assert_eq!("normal".parse::<Rarity>(), Ok(Rarity::Normal));
    assert_eq!("UR".parse::<Rarity>(), Err(NameError::Rarity("UR".into())));
    assert_eq!("Water".parse::<Element>(), Ok(Element::Water));
    assert_eq!("summon".parse::<ItemType>(), Ok(ItemType::Summon));
    assert!("lance".parse::<ItemType>().is_err());
    assert!(Rarity::SSRare > Rarity::SRare && Rarity::Rare > Rarity::Normal);
    assert_eq!(Rarity::SSRare.to_string(), "SS Rare");
}

#[cfg(feature = "assets")]
mod assets {
    use std::path::PathBuf;
    use skyroll::banner::structures::{DrawTable, Element, ItemType, Rarity};
    use skyroll::banner::{Banner, BannerError, LoadError};

    fn asset_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/assets/banner.toml")
    }

    #[test]
    fn loads_banner_files() {
        let banner = Banner::load_file(asset_path()).expect("failed to load test banner");
        let items = banner.items();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].name, "Sword of Eos");
        assert!(items[0].rate_up);
        assert_eq!(items[0].character.as_deref(), Some("Eos"));
        assert_eq!(items[1].rarity, Rarity::SSRare);
        assert_eq!(items[1].kind, ItemType::Summon);
        assert!(!items[1].rate_up);
        assert_eq!(items[2].element, Element::Fire);
        assert_eq!(items[3].rarity, Rarity::Rare);
        assert_eq!(banner.total_rate(DrawTable::Normal), 100.0);
        assert_eq!(banner.total_rate(DrawTable::Guaranteed), 100.0);
        assert_eq!(items[2].cum_rate2, 100.0);
    }

    #[test]
    fn banner_files_accept_every_spelling_of_a_name() {
        let banner = Banner::from_toml(r#"
            [[items]]
            id = "1"
            name = "Spelled Out"
            rarity = "S  Rare"
            element = "light"
            type = "sword"
            rate1 = 1.0
            rate2 = 1.0

            [[items]]
            id = "2"
            name = "Squashed"
            rarity = "ssrare"
            element = "DARK"
            type = "fist"
            rate1 = 1.0
            rate2 = 1.0

            [[items]]
            id = "3"
            name = "Short"
            rarity = "N"
            element = "Any"
            type = "Summon"
            rate1 = 1.0
            rate2 = 1.0
        "#).expect("failed to load alternate spellings");
        let items = banner.items();
        assert_eq!((items[0].rarity, items[0].element, items[0].kind), (Rarity::SRare, Element::Light, ItemType::Sabre));
        assert_eq!((items[1].rarity, items[1].element, items[1].kind), (Rarity::SSRare, Element::Dark, ItemType::Melee));
        assert_eq!((items[2].rarity, items[2].kind), (Rarity::Normal, ItemType::Summon));
    }

    #[test]
    fn reports_bad_banner_files() {
        assert!(matches!(
            Banner::from_toml("items = []"),
            Err(LoadError::BannerError(BannerError::Empty))
        ));
        assert!(matches!(
            Banner::from_toml(r#"
                [[items]]
                id = "1"
                name = "Nothing"
                rarity = "UR"
                element = "Fire"
                type = "Axe"
                rate1 = 1.0
                rate2 = 1.0
            "#),
            Err(LoadError::TomlError(err)) if err.to_string().contains("UR is not a valid rarity")
        ));
        assert!(matches!(
            Banner::load_file(asset_path().with_file_name("missing.toml")),
            Err(LoadError::IoError(_))
        ));
    }
}
