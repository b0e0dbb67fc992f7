//! Header records through cfitsio's keyword routines.
//!
//! The safe `fitsio` API reads and writes keys by name only. Listing every
//! card of an HDU, and writing them back with their comments, goes through
//! the raw handle.

use std::ffi::{c_char, c_int, CStr, CString};

use fitsio::errors::check_status;
use fitsio::sys;
use fitsio::FitsFile;

use crate::consts::{
    CARD_BUFFER_LEN, COMMENT_BUFFER_LEN, KEYNAME_BUFFER_LEN, MAX_STRING_VALUE_LEN,
    REAL_KEY_DECIMALS, VALUE_BUFFER_LEN,
};
use crate::error::{FitsViewError, Result};
use crate::header::{Card, HeaderValue};

/// Keywords cfitsio writes itself when it creates the primary image.
pub fn is_structural(keyword: &str) -> bool {
    match keyword {
        "SIMPLE" | "BITPIX" | "NAXIS" | "EXTEND" | "END" => true,
        k => k
            .strip_prefix("NAXIS")
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit())),
    }
}

fn buffer_text(buf: &[c_char]) -> String {
    // cfitsio always NUL-terminates within the buffer lengths above.
    unsafe { CStr::from_ptr(buf.as_ptr()) }
        .to_string_lossy()
        .into_owned()
}

fn c_string(text: &str) -> Result<CString> {
    CString::new(text)
        .map_err(|_| FitsViewError::HeaderMismatch(format!("NUL byte in header text {text:?}")))
}

/// Read every card of the current HDU, in file order, without `END`.
pub fn read_cards(fptr: &mut FitsFile) -> Result<Vec<Card>> {
    let raw = unsafe { fptr.as_raw() };
    let mut status: c_int = 0;
    let mut nexist: c_int = 0;
    let mut nmore: c_int = 0;
    unsafe {
        sys::ffghsp(raw, &mut nexist, &mut nmore, &mut status);
    }
    check_status(status)?;

    let mut cards = Vec::with_capacity(nexist.max(0) as usize);
    for nrec in 1..=nexist {
        let mut record = [0 as c_char; CARD_BUFFER_LEN];
        let mut keyword = [0 as c_char; KEYNAME_BUFFER_LEN];
        let mut value = [0 as c_char; VALUE_BUFFER_LEN];
        let mut comment = [0 as c_char; COMMENT_BUFFER_LEN];
        let mut keylen: c_int = 0;
        unsafe {
            sys::ffgrec(raw, nrec, record.as_mut_ptr(), &mut status);
            sys::ffgknm(record.as_mut_ptr(), keyword.as_mut_ptr(), &mut keylen, &mut status);
            sys::ffpsvc(
                record.as_mut_ptr(),
                value.as_mut_ptr(),
                comment.as_mut_ptr(),
                &mut status,
            );
        }
        check_status(status)?;

        let keyword = buffer_text(&keyword).to_uppercase();
        let comment = buffer_text(&comment);
        let value = if matches!(keyword.as_str(), "COMMENT" | "HISTORY" | "") {
            None
        } else {
            HeaderValue::from_value_field(&keyword, &buffer_text(&value))
        };
        cards.push(Card::from_record(
            keyword,
            value,
            (!comment.trim().is_empty()).then(|| comment.trim().to_string()),
            buffer_text(&record),
        ));
    }
    Ok(cards)
}

/// Append one card to the current HDU.
///
/// Cards still holding their file record are copied verbatim. Anything else
/// is formatted by cfitsio from its typed value. String values that would
/// need a continuation card are rejected.
pub fn write_card(fptr: &mut FitsFile, card: &Card) -> Result<()> {
    if let Some(HeaderValue::Text(ref s)) = card.value {
        if s.len() > MAX_STRING_VALUE_LEN {
            return Err(FitsViewError::HeaderMismatch(format!(
                "{}: string value of {} characters does not fit on one card (max {MAX_STRING_VALUE_LEN})",
                card.keyword,
                s.len()
            )));
        }
    }

    let raw = unsafe { fptr.as_raw() };
    let mut status: c_int = 0;

    if let Some(record) = card.record() {
        let record = c_string(record)?;
        unsafe {
            sys::ffprec(raw, record.as_ptr() as *mut c_char, &mut status);
        }
        return Ok(check_status(status)?);
    }

    let keyword = c_string(&card.keyword)?;
    let comment = c_string(card.comment.as_deref().unwrap_or(""))?;
    let key = keyword.as_ptr() as *mut c_char;
    let comm = comment.as_ptr() as *mut c_char;

    match (card.keyword.as_str(), &card.value) {
        ("HISTORY", _) => unsafe {
            sys::ffphis(raw, comm, &mut status);
        },
        ("COMMENT", _) => unsafe {
            sys::ffpcom(raw, comm, &mut status);
        },
        ("", _) => {
            let line = c_string(&format!("{:8}{}", "", card.comment.as_deref().unwrap_or("")))?;
            unsafe {
                sys::ffprec(raw, line.as_ptr() as *mut c_char, &mut status);
            }
        }
        (_, None) => unsafe {
            sys::ffpkyu(raw, key, comm, &mut status);
        },
        (_, Some(HeaderValue::Logical(b))) => unsafe {
            sys::ffpkyl(raw, key, c_int::from(*b), comm, &mut status);
        },
        (_, Some(HeaderValue::Integer(v))) => unsafe {
            sys::ffpkyj(raw, key, *v, comm, &mut status);
        },
        (_, Some(HeaderValue::Real(v))) => unsafe {
            sys::ffpkyd(raw, key, *v, REAL_KEY_DECIMALS, comm, &mut status);
        },
        (_, Some(HeaderValue::Text(s))) => {
            let value = c_string(s)?;
            unsafe {
                sys::ffpkys(raw, key, value.as_ptr() as *mut c_char, comm, &mut status);
            }
        }
    }
    Ok(check_status(status)?)
}

/// Re-read the structural keywords of the current HDU so that BSCALE,
/// BZERO and BLANK written after creation take effect on pixel writes.
pub fn reload_structure(fptr: &mut FitsFile) -> Result<()> {
    let raw = unsafe { fptr.as_raw() };
    let mut status: c_int = 0;
    unsafe {
        sys::ffrdef(raw, &mut status);
    }
    Ok(check_status(status)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_keywords() {
        for key in ["SIMPLE", "BITPIX", "NAXIS", "NAXIS1", "NAXIS12", "EXTEND", "END"] {
            assert!(is_structural(key), "{key}");
        }
        for key in ["NAXISX", "BSCALE", "OBJECT", "CRPIX1", "HISTORY"] {
            assert!(!is_structural(key), "{key}");
        }
    }
}
