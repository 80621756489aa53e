//! Mortar Run entry point
//!
//! Headless demo: plays a scripted session against a recording audio
//! backend and logs what the game asked the audio layer to do.
//!
//! Usage: `mortar-run [bank.json] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
use mortar_run::{
    AudioDirector, GameEvent, PlayerStateMachine, SceneryFlags, Settings, SoundBank,
    audio::RecordingBackend,
    consts::FRAME_DT,
    sim::{Key, KeyEvent},
};

/// Bank used when no bank file is given
#[cfg(not(target_arch = "wasm32"))]
const DEMO_BANK: &str = r#"[
    { "name": "music_intro", "clips": [{ "name": "intro_theme", "duration": 64.0 }] },
    { "name": "sfx_trailer_drum", "clips": [{ "name": "trailer_drum", "duration": 1.8 }] },
    { "name": "sfx_airborne", "clips": [
        { "name": "whistle_a", "duration": 2.6 },
        { "name": "whistle_b", "duration": 2.9 }
    ] },
    { "name": "sfx_explosion", "clips": [
        { "name": "explosion_a", "duration": 1.2 },
        { "name": "explosion_b", "duration": 1.4 },
        { "name": "explosion_c", "duration": 1.1 }
    ] },
    { "name": "sfx_footsteps", "clips": [{ "name": "footsteps_mud", "duration": 0.9 }] },
    { "name": "sfx_lose", "clips": [{ "name": "lose_sting", "duration": 2.5 }] },
    { "name": "vo_lose", "clips": [{ "name": "medic", "duration": 1.2 }] },
    { "name": "sfx_win", "clips": [{ "name": "win_sting", "duration": 3.0 }] },
    { "name": "vo_win", "clips": [{ "name": "made_it", "duration": 1.1 }] },
    { "name": "amb_battlefield", "clips": [{ "name": "battlefield_bed", "duration": 90.0 }] },
    { "name": "amb_distant_gunfire", "clips": [
        { "name": "gunfire_far_a", "duration": 2.0 },
        { "name": "gunfire_far_b", "duration": 2.4 }
    ] },
    { "name": "amb_shouts", "clips": [{ "name": "shouts", "duration": 1.6 }] }
]"#;

/// Scripted player input
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
enum Cue {
    Key(KeyEvent),
    Goal,
}

#[cfg(not(target_arch = "wasm32"))]
const SCRIPT: &[(f32, Cue)] = &[
    // First run: dash between shells, then get caught by the blast
    (4.0, Cue::Key(KeyEvent::Down(Key::Space))),
    (7.5, Cue::Key(KeyEvent::Up(Key::Space))),
    (11.5, Cue::Key(KeyEvent::Down(Key::Space))),
    (12.0, Cue::Key(KeyEvent::Up(Key::Space))),
    // Second run: make it to the goal
    (18.0, Cue::Key(KeyEvent::Down(Key::Space))),
    (20.0, Cue::Goal),
    (20.1, Cue::Key(KeyEvent::Up(Key::Space))),
    // Back to the title
    (22.0, Cue::Key(KeyEvent::Down(Key::Space))),
];

#[cfg(not(target_arch = "wasm32"))]
const SESSION_SECONDS: f32 = 24.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Mortar Run (headless) starting...");

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);

    let bank = match args.next() {
        Some(path) => SoundBank::from_json(&std::fs::read_to_string(path)?)?,
        None => SoundBank::from_json(DEMO_BANK)?,
    };
    for problem in bank.problems() {
        log::warn!("Sound bank: {problem}");
    }

    let settings = match args.next() {
        Some(path) => Settings::from_json(&std::fs::read_to_string(path)?)?,
        None => Settings::default(),
    };

    let audio = AudioDirector::new(RecordingBackend::new(), bank, &settings.mix, settings.seed);
    let mut game = PlayerStateMachine::new(&settings, audio, SceneryFlags::default());

    let mut script = SCRIPT.iter().peekable();
    let mut time = 0.0f32;
    let mut last_call = 0;

    while time < SESSION_SECONDS {
        while let Some((at, cue)) = script.peek() {
            if *at > time {
                break;
            }
            match cue {
                Cue::Key(event) => game.push_key(*event),
                Cue::Goal => game.on_goal_reached(),
            }
            script.next();
        }

        game.tick(FRAME_DT)?;
        time += FRAME_DT;

        for event in game.drain_events() {
            match event {
                GameEvent::StateEntered { from, to } => {
                    log::info!("[{time:6.2}s] {from:?} -> {to:?}")
                }
                other => log::info!("[{time:6.2}s] {other:?}"),
            }
        }

        let calls = game.audio().backend().calls();
        for call in &calls[last_call..] {
            log::debug!("[{time:6.2}s] audio: {call:?}");
        }
        last_call = calls.len();
    }

    log::info!(
        "Session over in {:?}; {} audio calls issued",
        game.state(),
        game.audio().backend().calls().len()
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No web host yet; the library is the product
}
