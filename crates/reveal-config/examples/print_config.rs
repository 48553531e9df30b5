/// Example program to print the loaded configuration
///
/// Run with: cargo run -p reveal-config --example print_config

fn main() {
    // Load configuration from reveal.toml
    let config = reveal_config::RevealConfig::load();

    println!("=== Reveal Configuration ===\n");

    println!("Viewport:");
    println!("  Size: {}x{}", config.viewport.width, config.viewport.height);
    println!();

    println!("Motion:");
    println!("  Default Easing: {}", config.motion.default_easing);
    println!("  Reveal Threshold: {}", config.motion.reveal_threshold);
    println!("  Trust Threshold: {}", config.motion.trust_threshold);
    println!("  Pin Distance: {} viewport heights", config.motion.pin_distance);
    println!("  Scrub Lag: {}ms", config.motion.scrub_lag_ms);
    println!();

    println!("Navigation:");
    println!("  Scrolled Threshold: {}px", config.navigation.scrolled_threshold_px);
    println!();

    println!("Demo:");
    println!("  Frame: {}ms", config.demo.frame_ms);
    println!("  Scroll Step: {}px", config.demo.scroll_step_px);
    println!("  JSON Events: {}", config.demo.json_events);
    println!();

    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
