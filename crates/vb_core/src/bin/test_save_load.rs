use vb_core::save::{SaveManager, SavedGame};
use vb_core::{
    ActionQuality, ActionResult, ActionType, Lineup, MatchEngine, Position, TeamConfig, TeamSide,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔧 Testing Save/Load System Integration...");

    // Note: Testing in current directory (saves/ subdirectory will be created)
    println!("📁 Using ./saves for save tests");
    let manager = SaveManager::new("saves");

    // Test 1: Basic save/load cycle
    println!("\n🧪 Test 1: Basic save/load functionality");

    let mut engine = MatchEngine::with_lineups(
        TeamConfig::new("Integration test", "Hawks", "Falcons")?,
        Lineup::from_numbers(["5", "7", "12", "3", "9", "11"]),
        Lineup::from_numbers(["1", "2", "4", "6", "8", "10"]),
    )?;

    engine.select_player(TeamSide::Us, Position::P3, None)?;
    engine.select_action(ActionType::Attack)?;
    engine.select_quality(ActionQuality::Good)?;
    engine.select_result(ActionResult::Point, None)?;
    println!("✅ Recorded one rally ({}:{})", engine.state().score_us, engine.state().score_opponent);

    let save = engine.to_saved_game("integration");
    manager.save_game(&save)?;
    println!("✅ Successfully saved 'integration'");

    if manager.game_exists("integration") {
        println!("✅ Save file exists");
    } else {
        return Err("save file should exist but doesn't".into());
    }

    let loaded: SavedGame = manager.load_game("integration")?;
    println!("✅ Successfully loaded 'integration'");

    if loaded.state == *engine.state() && loaded.config == *engine.config() {
        println!("✅ Data integrity verified - state and config match");
    } else {
        return Err("loaded state does not match the saved session".into());
    }

    // Test 2: Listing metadata
    println!("\n🧪 Test 2: Save listing");
    for info in manager.list_games() {
        println!("  {} (saved {})", info.get_display_text(), info.format_timestamp());
    }

    // Test 3: Cleanup
    println!("\n🧪 Test 3: Delete");
    manager.delete_game("integration")?;
    if !manager.game_exists("integration") {
        println!("✅ Save deleted");
    } else {
        return Err("save file should be gone".into());
    }

    println!("\n🎉 All save/load integration checks passed");
    Ok(())
}
