use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "voxedit", version, about = "Voxel document tool")]
pub struct Cli {
    /// Voxel catalog (TOML); overrides `catalog_path` from the editor config
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Editor config file
    #[arg(long, global = true, default_value = "assets/editor.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a blank document
    New { file: PathBuf },
    /// Print bounds, occupancy, settings and load warnings
    Info {
        /// Defaults to `startup_file` from the editor config
        file: Option<PathBuf>,
    },
    /// Rebuild the mesh and print statistics
    Mesh {
        /// Defaults to `startup_file` from the editor config
        file: Option<PathBuf>,
    },
    /// Place a voxel and save
    #[command(allow_negative_numbers = true)]
    Place {
        file: PathBuf,
        x: i32,
        y: i32,
        z: i32,
        /// Type name or numeric id
        #[arg(value_name = "TYPE")]
        voxel: String,
        /// Quarter turns counter-clockwise about +Y
        #[arg(long, default_value_t = 0)]
        yaw: u8,
        /// Mirror vertically
        #[arg(long)]
        flip: bool,
    },
    /// Clear a cell and save
    #[command(allow_negative_numbers = true)]
    Erase {
        file: PathBuf,
        x: i32,
        y: i32,
        z: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn place_accepts_negative_coords_and_flags() {
        let cli = Cli::try_parse_from([
            "voxedit", "--catalog", "c.toml", "place", "a.vxd", "-2", "0", "-7", "stairs", "--yaw",
            "3", "--flip",
        ])
        .unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("c.toml")));
        match cli.command {
            Command::Place {
                x,
                z,
                voxel,
                yaw,
                flip,
                ..
            } => {
                assert_eq!((x, z), (-2, -7));
                assert_eq!(voxel, "stairs");
                assert_eq!(yaw, 3);
                assert!(flip);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn config_defaults_to_assets() {
        let cli = Cli::try_parse_from(["voxedit", "info", "a.vxd"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("assets/editor.toml"));
        assert!(matches!(cli.command, Command::Info { file: Some(_) }));
    }

    #[test]
    fn info_and_mesh_file_is_optional() {
        let cli = Cli::try_parse_from(["voxedit", "mesh"]).unwrap();
        assert!(matches!(cli.command, Command::Mesh { file: None }));
        assert!(Cli::try_parse_from(["voxedit", "place"]).is_err());
    }
}
