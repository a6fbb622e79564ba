//! Piano-key frequency constants
//!
//! The 88 keys of a standard piano, A0 through C8, in equal temperament
//! with A4 = 440 Hz. Any f32 frequency works wherever a note is expected;
//! these are conveniences. Sharps are spelled with an S (`CS4` is C#4).

/// Frequency of the 1-based piano key `n`: `440 · 2^((n − 49) / 12)`.
pub fn key_freq(n: i32) -> f32 {
    440.0 * 2f32.powf((n as f32 - 49.0) / 12.0)
}

pub const A0: f32 = 27.5000;
pub const AS0: f32 = 29.1352;
pub const B0: f32 = 30.8677;
pub const C1: f32 = 32.7032;
pub const CS1: f32 = 34.6478;
pub const D1: f32 = 36.7081;
pub const DS1: f32 = 38.8909;
pub const E1: f32 = 41.2034;
pub const F1: f32 = 43.6535;
pub const FS1: f32 = 46.2493;
pub const G1: f32 = 48.9994;
pub const GS1: f32 = 51.9131;
pub const A1: f32 = 55.0000;
pub const AS1: f32 = 58.2705;
pub const B1: f32 = 61.7354;
pub const C2: f32 = 65.4064;
pub const CS2: f32 = 69.2957;
pub const D2: f32 = 73.4162;
pub const DS2: f32 = 77.7817;
pub const E2: f32 = 82.4069;
pub const F2: f32 = 87.3071;
pub const FS2: f32 = 92.4986;
pub const G2: f32 = 97.9989;
pub const GS2: f32 = 103.8262;
pub const A2: f32 = 110.0000;
pub const AS2: f32 = 116.5409;
pub const B2: f32 = 123.4708;
pub const C3: f32 = 130.8128;
pub const CS3: f32 = 138.5913;
pub const D3: f32 = 146.8324;
pub const DS3: f32 = 155.5635;
pub const E3: f32 = 164.8138;
pub const F3: f32 = 174.6141;
pub const FS3: f32 = 184.9972;
pub const G3: f32 = 195.9977;
pub const GS3: f32 = 207.6523;
pub const A3: f32 = 220.0000;
pub const AS3: f32 = 233.0819;
pub const B3: f32 = 246.9417;
pub const C4: f32 = 261.6256;
pub const CS4: f32 = 277.1826;
pub const D4: f32 = 293.6648;
pub const DS4: f32 = 311.1270;
pub const E4: f32 = 329.6276;
pub const F4: f32 = 349.2282;
pub const FS4: f32 = 369.9944;
pub const G4: f32 = 391.9954;
pub const GS4: f32 = 415.3047;
pub const A4: f32 = 440.0000;
pub const AS4: f32 = 466.1638;
pub const B4: f32 = 493.8833;
pub const C5: f32 = 523.2511;
pub const CS5: f32 = 554.3653;
pub const D5: f32 = 587.3295;
pub const DS5: f32 = 622.2540;
pub const E5: f32 = 659.2551;
pub const F5: f32 = 698.4565;
pub const FS5: f32 = 739.9888;
pub const G5: f32 = 783.9909;
pub const GS5: f32 = 830.6094;
pub const A5: f32 = 880.0000;
pub const AS5: f32 = 932.3275;
pub const B5: f32 = 987.7666;
pub const C6: f32 = 1046.5023;
pub const CS6: f32 = 1108.7305;
pub const D6: f32 = 1174.6591;
pub const DS6: f32 = 1244.5079;
pub const E6: f32 = 1318.5102;
pub const F6: f32 = 1396.9129;
pub const FS6: f32 = 1479.9777;
pub const G6: f32 = 1567.9817;
pub const GS6: f32 = 1661.2188;
pub const A6: f32 = 1760.0000;
pub const AS6: f32 = 1864.6550;
pub const B6: f32 = 1975.5332;
pub const C7: f32 = 2093.0045;
pub const CS7: f32 = 2217.4610;
pub const D7: f32 = 2349.3181;
pub const DS7: f32 = 2489.0159;
pub const E7: f32 = 2637.0205;
pub const F7: f32 = 2793.8259;
pub const FS7: f32 = 2959.9554;
pub const G7: f32 = 3135.9635;
pub const GS7: f32 = 3322.4376;
pub const A7: f32 = 3520.0000;
pub const AS7: f32 = 3729.3101;
pub const B7: f32 = 3951.0664;
pub const C8: f32 = 4186.0090;
