#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable
#![allow(missing_docs)] // integration test crate carries no public API docs

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn rk() -> Command {
    Command::cargo_bin("rk").unwrap()
}

const BULK_MONSTERS: &str = r#"[
    {
        "index": "goblin",
        "name": "Goblin",
        "size": "Small",
        "type": "humanoid",
        "subtype": "goblinoid",
        "alignment": "neutral evil",
        "armor_class": 15,
        "hit_points": 7,
        "hit_dice": "2d6",
        "speed": { "walk": "30 ft." },
        "strength": 8,
        "dexterity": 14,
        "constitution": 10,
        "intelligence": 10,
        "wisdom": 8,
        "charisma": 8,
        "proficiencies": [
            { "name": "Skill: Stealth", "url": "/api/proficiencies/skill-stealth", "value": 6 }
        ],
        "damage_vulnerabilities": [],
        "damage_resistances": [],
        "damage_immunities": [],
        "condition_immunities": [],
        "senses": { "darkvision": "60 ft.", "passive_perception": 9 },
        "languages": "Common, Goblin",
        "challenge_rating": 0.25,
        "url": "/api/monsters/goblin",
        "actions": [
            {
                "name": "Scimitar",
                "desc": "Melee Weapon Attack: +4 to hit, reach 5 ft., one target. Hit: 5 (1d6 + 2) slashing damage.",
                "attack_bonus": 4,
                "damage": [
                    {
                        "damage_type": { "name": "Slashing", "url": "/api/damage-types/slashing" },
                        "damage_dice": "1d6+2"
                    }
                ]
            }
        ]
    }
]"#;

const BULK_SPELLS: &str = r#"[
    { "index": "fire-bolt", "name": "Fire Bolt", "level": 0 },
    { "index": "shield", "name": "Shield", "level": 1 }
]"#;

#[test]
fn roll_is_reproducible_with_seed() {
    let output = |seed: &str| {
        let out = rk()
            .args(["roll", "2d6+3", "--seed", seed])
            .assert()
            .success();
        String::from_utf8(out.get_output().stdout.clone()).unwrap()
    };
    assert_eq!(output("42"), output("42"));
    assert!(output("42").contains("2d6+3"));
}

#[test]
fn roll_rejects_garbage() {
    rk().args(["roll", "banana"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a dice expression"));
}

#[test]
fn generate_renders_statblock() {
    rk().args(["generate", "--cr", "1", "--name", "Spy", "--archetype", "sneak"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spy"))
        .stdout(predicate::str::contains("Multiattack"))
        .stdout(predicate::str::contains("Sneak Attack"))
        .stdout(predicate::str::contains("Cunning Action"))
        .stdout(predicate::str::contains("damage quota"));
}

#[test]
fn generate_emits_json() {
    let out = rk()
        .args(["generate", "--cr", "2", "--json"])
        .assert()
        .success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["template"]["attack_bonus"], 5);
    assert_eq!(value["monster"]["hit_points"], 45);
}

#[test]
fn generate_rejects_unknown_archetype() {
    rk().args(["generate", "--cr", "1", "--archetype", "brute"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown archetype"));
}

#[test]
fn srd_split_list_show_pipeline() {
    let tmp = TempDir::new().unwrap();
    let monsters = tmp.path().join("5e-SRD-Monsters.json");
    let spells = tmp.path().join("5e-SRD-Spells.json");
    fs::write(&monsters, BULK_MONSTERS).unwrap();
    fs::write(&spells, BULK_SPELLS).unwrap();
    let catalog = tmp.path().join("srd");

    rk().arg("srd")
        .arg("split")
        .arg(&monsters)
        .arg(&spells)
        .arg("--out")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 monsters"))
        .stdout(predicate::str::contains("2 spells"));

    assert!(catalog.join("monster/goblin.json").is_file());
    assert!(catalog.join("monster/index.json").is_file());
    assert!(catalog.join("spell/fire-bolt.json").is_file());

    rk().arg("srd")
        .arg("list")
        .arg("--dir")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("Goblin"))
        .stdout(predicate::str::contains("1/4"));

    rk().arg("srd")
        .arg("show")
        .arg("goblin")
        .arg("--dir")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("Goblin"))
        .stdout(predicate::str::contains("Scimitar"))
        .stdout(predicate::str::contains("Stealth +6"));
}

#[test]
fn srd_show_unknown_monster_fails() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("monster")).unwrap();
    rk().arg("srd")
        .arg("show")
        .arg("tarrasque")
        .arg("--dir")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("tarrasque"));
}

#[test]
fn track_session_over_stdin() {
    rk().args(["track", "--seed", "42"])
        .write_stdin("add player Orel\nmove Orel\naction Orel spell\norder\nconfirm Orel\nnext\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Orel joins the encounter (player)"))
        .stdout(predicate::str::contains("lower acts first"))
        .stdout(predicate::str::contains("locked at initiative"))
        .stdout(predicate::str::contains("Round 2"));
}

#[test]
fn track_session_is_reproducible() {
    let run = || {
        let out = rk()
            .args(["track", "--seed", "7"])
            .write_stdin("add player Orel\nmove Orel\norder\nquit\n")
            .assert()
            .success();
        String::from_utf8(out.get_output().stdout.clone()).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn track_reports_bad_commands_and_continues() {
    rk().args(["track"])
        .write_stdin("teleport Orel\nadd player Orel\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("invalid command"))
        .stdout(predicate::str::contains("Orel joins"));
}
