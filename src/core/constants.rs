//! Defaults and word lists shared across the crate.

/// Defaults used when a circuit is created without explicit dimensions.
pub mod logiq_constants {
    /// Number of wires in a default circuit.
    pub const DEFAULT_BANDWIDTH: u32 = 3;
    /// Number of moments in a default circuit.
    pub const DEFAULT_TIMEWIDTH: u32 = 5;
    /// Symbol of the placeholder that fills empty grid cells.
    pub const IDENTITY_SYMBOL: &str = "I";
}

/// Words combined into circuit names such as "Cobalt Adder".
pub mod name_words {
    pub const DEVICES: [&str; 29] = [
        "Amplifier", "Accumulator", "ALU", "Adder", "Buffer", "Comparator",
        "Counter", "Decoder", "Demux", "Driver", "Encoder", "Flip-flop",
        "Gate", "Inverter", "Latch", "LED", "Multiplexer", "NAND", "NOR",
        "Register", "Relay", "Resistor", "Selector", "Sensor", "Shifter",
        "Switch", "Timer", "Transistor", "XOR",
    ];

    // One colour per 10 degrees of hue.
    pub const COLORS: [&str; 36] = [
        "Red", "Scarlet", "Tawny", "Carrot", "Pumpkin", "Mustard",
        "Lemon", "Lime", "Spring bud", "Spring grass", "Pear", "Kelly",
        "Green", "Malachite", "Sea green", "Sea foam", "Aquamarine", "Turquoise",
        "Cyan", "Pacific blue", "Baby blue", "Ocean blue", "Sapphire", "Azure",
        "Blue", "Cobalt", "Indigo", "Violet", "Lavender", "Purple",
        "Magenta", "Hot pink", "Fuschia", "Ruby", "Crimson", "Carmine",
    ];
}
