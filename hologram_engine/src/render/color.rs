//! Sample-to-color mapping: a material palette and a height gradient.

use bevy::prelude::*;

use crate::data::Material;

/// Which of the two mappings drives point colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Palette lookup on the sampled material.
    #[default]
    Material,
    /// Gradient over the sample's normalized height within the scan bounds.
    Height,
}

/// Neutral gray for materials without a palette entry.
const FALLBACK: Color = Color::srgb(0.588, 0.588, 0.588);

/// Map a surface material to its palette color. Materials without an entry
/// degrade to a neutral gray; this never fails.
pub fn material_color(material: Material) -> Color {
    use Material::*;

    match material {
        // Natural terrain
        GrassBlock | TallGrass | Fern | LargeFern => Color::srgb_u8(102, 153, 51),
        Dirt => Color::srgb_u8(139, 69, 19),
        Stone => Color::srgb_u8(128, 128, 128),
        Cobblestone | StoneBricks => Color::srgb_u8(112, 112, 112),
        Sand => Color::srgb_u8(255, 255, 153),
        Gravel => Color::srgb_u8(169, 169, 169),
        Clay => Color::srgb_u8(159, 121, 93),
        Water | BlueOrchid => Color::srgb_u8(64, 64, 255),
        Sandstone => Color::srgb_u8(210, 180, 140),
        RedSand => Color::srgb_u8(255, 153, 51),
        RedSandstone => Color::srgb_u8(205, 92, 92),
        Snow => Color::srgb_u8(255, 255, 255),
        Ice => Color::srgb_u8(173, 216, 230),
        PackedIce => Color::srgb_u8(160, 224, 224),
        BlueIce => Color::srgb_u8(96, 160, 192),
        Mud => Color::srgb_u8(79, 50, 35),
        // Flowers and plants
        Poppy | RoseBush => Color::srgb_u8(255, 0, 0),
        Dandelion | Sunflower => Color::srgb_u8(255, 255, 0),
        Cornflower => Color::srgb_u8(100, 149, 237),
        OxeyeDaisy => Color::srgb_u8(255, 255, 255),
        Lilac => Color::srgb_u8(171, 130, 255),
        Peony => Color::srgb_u8(255, 182, 193),
        LilyPad | Kelp | Seagrass => Color::srgb_u8(34, 139, 34),
        SugarCane => Color::srgb_u8(224, 224, 224),
        Bamboo => Color::srgb_u8(245, 245, 220),
        MossBlock => Color::srgb_u8(0, 128, 0),
        Vine => Color::srgb_u8(0, 100, 0),
        SweetBerryBush => Color::srgb_u8(139, 69, 19),
        // Trees
        OakLog => Color::srgb_u8(139, 69, 19),
        SpruceLog => Color::srgb_u8(110, 55, 15),
        BirchLog => Color::srgb_u8(210, 180, 140),
        JungleLog => Color::srgb_u8(145, 105, 60),
        AcaciaLog => Color::srgb_u8(179, 99, 44),
        DarkOakLog => Color::srgb_u8(89, 48, 23),
        MangroveLog => Color::srgb_u8(91, 59, 41),
        CherryLog => Color::srgb_u8(160, 82, 45),
        OakLeaves | MangroveLeaves => Color::srgb_u8(0, 128, 0),
        SpruceLeaves => Color::srgb_u8(0, 100, 0),
        BirchLeaves => Color::srgb_u8(154, 205, 50),
        JungleLeaves => Color::srgb_u8(0, 139, 0),
        AcaciaLeaves => Color::srgb_u8(143, 188, 143),
        DarkOakLeaves => Color::srgb_u8(85, 107, 47),
        CherryLeaves => Color::srgb_u8(255, 182, 193),
        // Ores
        CoalOre => Color::srgb_u8(0, 0, 0),
        IronOre => Color::srgb_u8(189, 183, 107),
        GoldOre | BeeNest => Color::srgb_u8(255, 215, 0),
        RedstoneOre => Color::srgb_u8(255, 0, 0),
        LapisOre => Color::srgb_u8(25, 25, 112),
        DiamondOre => Color::srgb_u8(0, 139, 139),
        EmeraldOre => Color::srgb_u8(0, 255, 0),
        CopperOre => Color::srgb_u8(205, 127, 50),
        // Mushrooms
        BrownMushroom => Color::srgb_u8(139, 69, 19),
        RedMushroom => Color::srgb_u8(255, 0, 0),
        // Player-made
        OakPlanks => Color::srgb_u8(160, 82, 45),
        SprucePlanks => Color::srgb_u8(139, 69, 19),
        BirchPlanks => Color::srgb_u8(245, 245, 220),
        JunglePlanks => Color::srgb_u8(244, 164, 96),
        AcaciaPlanks => Color::srgb_u8(255, 140, 0),
        DarkOakPlanks => Color::srgb_u8(72, 61, 139),
        Bricks => Color::srgb_u8(178, 34, 34),
        Cobweb => Color::srgb_u8(255, 255, 255),
        _ => FALLBACK,
    }
}

const DARK_RED: f32 = 139.0 / 255.0;

/// Blue → cyan → green → yellow → red → dark-red gradient over `[0, 1]`.
/// Five equal bands, each linearly interpolating its endpoints; continuous at
/// the band boundaries. Input is clamped, so there is no error path.
pub fn height_color(height: f32) -> Color {
    let h = height.clamp(0.0, 1.0);

    if h < 0.2 {
        let t = h / 0.2;
        Color::srgb(0.0, t, 1.0)
    } else if h < 0.4 {
        let t = (h - 0.2) / 0.2;
        Color::srgb(0.0, 1.0, 1.0 - t)
    } else if h < 0.6 {
        let t = (h - 0.4) / 0.2;
        Color::srgb(t, 1.0, 0.0)
    } else if h < 0.8 {
        let t = (h - 0.6) / 0.2;
        Color::srgb(1.0, 1.0 - t, 0.0)
    } else {
        let t = (h - 0.8) / 0.2;
        Color::srgb(1.0 + (DARK_RED - 1.0) * t, 0.0, 0.0)
    }
}
