//! NIfTI-1 support.
//!
//! NIfTI-1 is the standard volume format of medical segmentation tools. A
//! single-file volume (`.nii`) is a 348-byte header, a 4-byte extension flag
//! and the voxel data starting at `vox_offset`. `.nii.gz` is the same byte
//! stream gzip-compressed.
//!
//! # Supported Subset
//!
//! - Single-file volumes only (magic `n+1`)
//! - Little and big endian, detected from `sizeof_hdr`
//! - 3D volumes; a 4D file is accepted only when every extra dimension is 1
//! - Integer and floating point datatypes, with `scl_slope` / `scl_inter`
//!
//! Voxel values must be non-negative integers after scaling, because they are
//! interpreted as segment labels.
//!
//! # Example
//!
//! ```no_run
//! use volume_io::{load_nifti, save_nifti};
//!
//! let volume = load_nifti("segmentation.nii.gz").unwrap();
//! save_nifti(&volume, "copy.nii").unwrap();
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use tracing::debug;
use volume_types::{Label, LabeledVolume, VoxelGrid, VoxelSpacing};

use crate::VolumeFormat;
use crate::error::{VolumeIoError, VolumeIoResult};

/// Size of the NIfTI-1 header in bytes.
const HEADER_SIZE: usize = 348;

/// Header plus the 4-byte extension flag; the smallest legal `vox_offset`.
const MIN_VOX_OFFSET: usize = 352;

/// Magic of a single-file NIfTI-1 volume.
const MAGIC_SINGLE_FILE: &[u8; 4] = b"n+1\0";

/// Magic of a header/image pair, which is not supported.
const MAGIC_PAIR: &[u8; 4] = b"ni1\0";

/// Tolerance when checking that scaled voxel values are integral.
const LABEL_TOLERANCE: f64 = 1e-3;

/// NIfTI voxel datatypes understood by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Datatype {
    U8,
    I8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl Datatype {
    fn from_code(code: i16) -> VolumeIoResult<Self> {
        Ok(match code {
            2 => Self::U8,
            4 => Self::I16,
            8 => Self::I32,
            16 => Self::F32,
            64 => Self::F64,
            256 => Self::I8,
            512 => Self::U16,
            768 => Self::U32,
            1024 => Self::I64,
            1280 => Self::U64,
            _ => return Err(VolumeIoError::UnsupportedDatatype { code }),
        })
    }

    const fn code(self) -> i16 {
        match self {
            Self::U8 => 2,
            Self::I16 => 4,
            Self::I32 => 8,
            Self::F32 => 16,
            Self::F64 => 64,
            Self::I8 => 256,
            Self::U16 => 512,
            Self::U32 => 768,
            Self::I64 => 1024,
            Self::U64 => 1280,
        }
    }

    const fn size(self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
        }
    }
}

/// Byte order of a header and its voxel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endian {
    Little,
    Big,
}

/// Fixed-offset reader over the raw header bytes.
struct HeaderReader<'a> {
    bytes: &'a [u8],
    endian: Endian,
}

impl HeaderReader<'_> {
    fn array<const N: usize>(&self, offset: usize) -> [u8; N] {
        let mut buf = [0u8; N];
        buf.copy_from_slice(&self.bytes[offset..offset + N]);
        buf
    }

    fn i16(&self, offset: usize) -> i16 {
        let buf = self.array::<2>(offset);
        match self.endian {
            Endian::Little => i16::from_le_bytes(buf),
            Endian::Big => i16::from_be_bytes(buf),
        }
    }

    fn f32(&self, offset: usize) -> f32 {
        let buf = self.array::<4>(offset);
        match self.endian {
            Endian::Little => f32::from_le_bytes(buf),
            Endian::Big => f32::from_be_bytes(buf),
        }
    }
}

/// The header fields needed to decode a label volume.
#[derive(Debug, Clone, PartialEq)]
struct Header {
    endian: Endian,
    dimensions: (usize, usize, usize),
    datatype: Datatype,
    spacing: (f64, f64, f64),
    vox_offset: usize,
    scl_slope: f64,
    scl_inter: f64,
}

impl Header {
    fn parse(bytes: &[u8]) -> VolumeIoResult<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(VolumeIoError::UnexpectedEof {
                expected: HEADER_SIZE,
                actual: bytes.len(),
            });
        }

        let sizeof_hdr = [bytes[0], bytes[1], bytes[2], bytes[3]];
        let endian = if i32::from_le_bytes(sizeof_hdr) == 348 {
            Endian::Little
        } else if i32::from_be_bytes(sizeof_hdr) == 348 {
            Endian::Big
        } else {
            return Err(VolumeIoError::invalid_header(
                "sizeof_hdr is not 348 in either byte order",
            ));
        };
        let reader = HeaderReader { bytes, endian };

        let magic = reader.array::<4>(344);
        if &magic == MAGIC_PAIR {
            return Err(VolumeIoError::invalid_header(
                "header/image pairs (.hdr/.img) are not supported",
            ));
        }
        if &magic != MAGIC_SINGLE_FILE {
            return Err(VolumeIoError::invalid_header(format!(
                "bad magic {magic:?}, expected \"n+1\""
            )));
        }

        let dim: Vec<i16> = (0..8).map(|i| reader.i16(40 + 2 * i)).collect();
        let rank = dim[0];
        if !(3..=7).contains(&rank) {
            return Err(VolumeIoError::invalid_header(format!(
                "dim[0] = {rank}, expected a 3D volume"
            )));
        }
        #[allow(clippy::cast_sign_loss)]
        // Sign: `rank` was checked to be in 3..=7 above
        let extra = &dim[4..=rank as usize];
        if extra.iter().any(|&d| d != 1) {
            return Err(VolumeIoError::invalid_header(format!(
                "only single 3D volumes are supported, got dim = {dim:?}"
            )));
        }
        let mut extents = [0usize; 3];
        for (axis, extent) in extents.iter_mut().enumerate() {
            let d = dim[axis + 1];
            *extent = usize::try_from(d)
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    VolumeIoError::invalid_header(format!("dim[{}] = {d} is not positive", axis + 1))
                })?;
        }

        let datatype = Datatype::from_code(reader.i16(70))?;

        let mut spacing = [0.0f64; 3];
        for (axis, value) in spacing.iter_mut().enumerate() {
            *value = f64::from(reader.f32(80 + 4 * axis)).abs();
        }

        let raw_offset = reader.f32(108);
        if !raw_offset.is_finite() || raw_offset < 0.0 {
            return Err(VolumeIoError::invalid_header(format!(
                "vox_offset {raw_offset} is not a valid byte offset"
            )));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        // Truncation/sign: checked finite and non-negative above
        let vox_offset = (raw_offset as usize).max(MIN_VOX_OFFSET);

        Ok(Self {
            endian,
            dimensions: (extents[0], extents[1], extents[2]),
            datatype,
            spacing: (spacing[0], spacing[1], spacing[2]),
            vox_offset,
            scl_slope: f64::from(reader.f32(112)),
            scl_inter: f64::from(reader.f32(116)),
        })
    }

    /// Apply `scl_slope` / `scl_inter`. A zero or non-finite slope means
    /// "no scaling".
    fn scale(&self, raw: f64) -> f64 {
        if self.scl_slope != 0.0 && self.scl_slope.is_finite() {
            let inter = if self.scl_inter.is_finite() {
                self.scl_inter
            } else {
                0.0
            };
            raw.mul_add(self.scl_slope, inter)
        } else {
            raw
        }
    }
}

/// Load a labeled volume from a `.nii` or `.nii.gz` file.
///
/// The compression is chosen from the file name.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The extension is neither `.nii` nor `.nii.gz`
/// - The header is malformed or describes an unsupported layout
/// - A voxel value is not a non-negative integer label
pub fn load_nifti<P: AsRef<Path>>(path: P) -> VolumeIoResult<LabeledVolume> {
    let path = path.as_ref();
    let format = VolumeFormat::from_path(path).ok_or_else(|| unknown_format(path))?;

    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            VolumeIoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            VolumeIoError::Io(e)
        }
    })?;

    let reader = BufReader::new(file);
    let bytes = match format {
        VolumeFormat::Nifti => read_all(reader)?,
        VolumeFormat::NiftiGz => read_all(GzDecoder::new(reader))?,
    };

    let volume = parse_nifti(&bytes)?;
    debug!(
        path = %path.display(),
        dimensions = ?volume.dimensions(),
        spacing = ?volume.spacing(),
        "loaded NIfTI volume"
    );
    Ok(volume)
}

/// Read a whole stream, reporting corrupt gzip data as a content error.
fn read_all<R: Read>(mut reader: R) -> VolumeIoResult<Vec<u8>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(|e| match e.kind() {
        std::io::ErrorKind::InvalidData | std::io::ErrorKind::InvalidInput => {
            VolumeIoError::invalid_content(format!("corrupt compressed stream: {e}"))
        }
        _ => VolumeIoError::Io(e),
    })?;
    Ok(bytes)
}

/// Decode an uncompressed single-file NIfTI-1 byte stream.
///
/// # Errors
///
/// Same format errors as [`load_nifti`].
pub fn parse_nifti(bytes: &[u8]) -> VolumeIoResult<LabeledVolume> {
    let header = Header::parse(bytes)?;
    let (nx, ny, nz) = header.dimensions;
    let count = nx
        .checked_mul(ny)
        .and_then(|n| n.checked_mul(nz))
        .ok_or_else(|| VolumeIoError::invalid_header("voxel count overflows"))?;
    let width = header.datatype.size();
    let data_len = count
        .checked_mul(width)
        .ok_or_else(|| VolumeIoError::invalid_header("voxel data size overflows"))?;
    let end = header.vox_offset.saturating_add(data_len);

    let data = bytes
        .get(header.vox_offset..end)
        .ok_or(VolumeIoError::UnexpectedEof {
            expected: end,
            actual: bytes.len(),
        })?;

    let labels = data
        .chunks_exact(width)
        .map(|chunk| {
            let raw = decode_value(chunk, header.datatype, header.endian);
            to_label(header.scale(raw))
        })
        .collect::<VolumeIoResult<Vec<Label>>>()?;

    let (sx, sy, sz) = header.spacing;
    let spacing = VoxelSpacing::new(sx, sy, sz)?;
    let grid = VoxelGrid::from_vec(header.dimensions, labels)?;

    Ok(LabeledVolume::new(grid, spacing))
}

/// Decode one voxel to `f64`.
#[allow(clippy::cast_precision_loss)]
// Precision: 64-bit labels above 2^53 are rejected later as non-u32 anyway
fn decode_value(chunk: &[u8], datatype: Datatype, endian: Endian) -> f64 {
    macro_rules! decode {
        ($ty:ty, $n:literal) => {{
            let mut buf = [0u8; $n];
            buf.copy_from_slice(chunk);
            match endian {
                Endian::Little => <$ty>::from_le_bytes(buf),
                Endian::Big => <$ty>::from_be_bytes(buf),
            }
        }};
    }

    match datatype {
        Datatype::U8 => f64::from(chunk[0]),
        Datatype::I8 => f64::from(i8::from_ne_bytes([chunk[0]])),
        Datatype::I16 => f64::from(decode!(i16, 2)),
        Datatype::U16 => f64::from(decode!(u16, 2)),
        Datatype::I32 => f64::from(decode!(i32, 4)),
        Datatype::U32 => f64::from(decode!(u32, 4)),
        Datatype::I64 => decode!(i64, 8) as f64,
        Datatype::U64 => decode!(u64, 8) as f64,
        Datatype::F32 => f64::from(decode!(f32, 4)),
        Datatype::F64 => decode!(f64, 8),
    }
}

/// Convert a scaled voxel value to a label.
fn to_label(value: f64) -> VolumeIoResult<Label> {
    let rounded = value.round();
    if !value.is_finite()
        || (value - rounded).abs() > LABEL_TOLERANCE
        || rounded < 0.0
        || rounded > f64::from(Label::MAX)
    {
        return Err(VolumeIoError::invalid_content(format!(
            "voxel value {value} is not a valid segment label"
        )));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // Truncation/sign: range checked above
    Ok(rounded as Label)
}

/// Save a labeled volume as a little-endian single-file NIfTI-1 volume.
///
/// Labels are stored as `uint32`. A path ending in `.nii.gz` is gzip
/// compressed.
///
/// # Errors
///
/// Returns an error if:
/// - The extension is neither `.nii` nor `.nii.gz`
/// - A dimension exceeds the 16-bit limit of the NIfTI-1 header
/// - The file cannot be written
pub fn save_nifti<P: AsRef<Path>>(volume: &LabeledVolume, path: P) -> VolumeIoResult<()> {
    let path = path.as_ref();
    let format = VolumeFormat::from_path(path).ok_or_else(|| unknown_format(path))?;

    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    match format {
        VolumeFormat::Nifti => {
            let mut writer = writer;
            write_nifti(volume, &mut writer)?;
            writer.flush()?;
        }
        VolumeFormat::NiftiGz => {
            let mut encoder = GzEncoder::new(writer, Compression::default());
            write_nifti(volume, &mut encoder)?;
            encoder.finish()?.flush()?;
        }
    }

    debug!(path = %path.display(), "saved NIfTI volume");
    Ok(())
}

/// Write the uncompressed NIfTI-1 byte stream of a volume.
///
/// # Errors
///
/// Returns an error if a dimension does not fit the header or the writer fails.
pub fn write_nifti<W: Write>(volume: &LabeledVolume, writer: &mut W) -> VolumeIoResult<()> {
    let (nx, ny, nz) = volume.dimensions();
    let to_dim = |n: usize| {
        i16::try_from(n).map_err(|_| {
            VolumeIoError::invalid_content(format!("dimension {n} exceeds the NIfTI-1 limit"))
        })
    };
    let dims = [3, to_dim(nx)?, to_dim(ny)?, to_dim(nz)?, 1, 1, 1, 1];

    let spacing = volume.spacing();
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: the header stores spacing as f32
    let pixdim = [
        1.0f32,
        spacing.x() as f32,
        spacing.y() as f32,
        spacing.z() as f32,
        0.0,
        0.0,
        0.0,
        0.0,
    ];

    let mut header = [0u8; HEADER_SIZE];
    header[0..4].copy_from_slice(&348i32.to_le_bytes());
    for (i, d) in dims.iter().enumerate() {
        header[40 + 2 * i..42 + 2 * i].copy_from_slice(&d.to_le_bytes());
    }
    header[70..72].copy_from_slice(&Datatype::U32.code().to_le_bytes());
    header[72..74].copy_from_slice(&32i16.to_le_bytes());
    for (i, p) in pixdim.iter().enumerate() {
        header[76 + 4 * i..80 + 4 * i].copy_from_slice(&p.to_le_bytes());
    }
    #[allow(clippy::cast_precision_loss)]
    // Precision: 352 is exactly representable
    let vox_offset = MIN_VOX_OFFSET as f32;
    header[108..112].copy_from_slice(&vox_offset.to_le_bytes());
    header[112..116].copy_from_slice(&1.0f32.to_le_bytes());
    // xyzt_units: millimetres
    header[123] = 2;
    header[344..348].copy_from_slice(MAGIC_SINGLE_FILE);

    writer.write_all(&header)?;
    // No extensions
    writer.write_all(&[0u8; 4])?;
    for &label in volume.labels().values() {
        writer.write_all(&label.to_le_bytes())?;
    }
    Ok(())
}

fn unknown_format(path: &Path) -> VolumeIoError {
    VolumeIoError::UnknownFormat {
        file_name: path
            .file_name()
            .map_or_else(|| "(none)".to_string(), |n| n.to_string_lossy().into_owned()),
    }
}
