#![allow(dead_code)]

use settlement_sim::model::*;
use settlement_sim::scenario::Scenario;

/// Ids of the entities created by [`build_test_world`].
pub struct TestWorld {
    pub world: World,
    pub wei: u64,
    pub shu: u64,
    pub xuchang: u64,
    pub ye: u64,
    pub chengdu: u64,
    pub free_city: u64,
    pub cao_cao: u64,
    pub spearmen: u64,
    pub tiger_cavalry: u64,
}

/// Two factions, four settlements (one unowned), a leader, a handful of
/// officers and two military kinds.
pub fn build_test_world() -> TestWorld {
    let mut s = Scenario::new();
    let wei = s.add_faction("Wei");
    let shu = s.add_faction("Shu");

    let spearmen = s.military_kind("Spearmen").cost(8).id();
    let tiger_cavalry = s.military_kind("Tiger Cavalry").cost(20).licensed_only().id();

    let xuchang = s
        .architecture("Xuchang")
        .owned_by(wei)
        .population(20_000)
        .fund(2_000)
        .food(5_000)
        .development(300.0)
        .tile(11, 10)
        .licensed_for(tiger_cavalry)
        .id();
    let ye = s
        .architecture("Ye")
        .owned_by(wei)
        .population(8_000)
        .fund(40)
        .development(120.0)
        .connect_to(xuchang)
        .id();
    let chengdu = s
        .architecture("Chengdu")
        .owned_by(shu)
        .population(15_000)
        .fund(900)
        .development(250.0)
        .id();
    let free_city = s.architecture("Free City").population(3_000).fund(100).id();

    let cao_cao = s.person("Cao Cao").at(xuchang).ability(90).leads(wei).id();
    s.person("Xun Yu").at(xuchang).work(WorkKind::Commerce).ability(85);
    s.person("Dian Wei").at(xuchang).work(WorkKind::Training).training(70);
    s.person("Man Chong").at(xuchang).work(WorkKind::Recruit).recruit(60);
    for i in 0..6 {
        let stat = DevelopmentStat::ALL[i % DevelopmentStat::ALL.len()];
        s.person(&format!("Ye Clerk {i}")).at(ye).work(stat.into()).ability(40);
    }
    s.person("Zhuge Liang").at(chengdu).ability(95);
    s.person("Ma Su").at(chengdu).work(WorkKind::Agriculture).ability(60);
    s.person("Wanderer").at(free_city).ability(30);

    s.military("Tiger Guard", xuchang, tiger_cavalry)
        .leader(cao_cao)
        .quantity(1_000);
    s.military("Xuchang Levy", xuchang, spearmen);
    s.military("Chengdu Guard", chengdu, spearmen).quantity(3_000);

    TestWorld {
        world: s.build(),
        wei,
        shu,
        xuchang,
        ye,
        chengdu,
        free_city,
        cao_cao,
        spearmen,
        tiger_cavalry,
    }
}

pub fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
