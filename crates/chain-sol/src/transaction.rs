//! Legacy Solana transaction compilation, serialization and signing.
//!
//! ```text
//! Transaction:
//!   num_signatures          compact-u16
//!   signatures              64 bytes * num_signatures
//!   message:
//!     num_required_sigs     u8
//!     num_readonly_signed   u8
//!     num_readonly_unsigned u8
//!     num_accounts          compact-u16
//!     account_keys          32 bytes * num_accounts
//!     recent_blockhash      32 bytes
//!     num_instructions      compact-u16
//!     instructions[]
//!
//! Instruction:
//!   program_id_index        u8
//!   num_accounts            compact-u16
//!   account_indices         u8 * num_accounts
//!   data_len                compact-u16
//!   data                    u8 * data_len
//! ```

use crate::address::{pubkey_to_string, Pubkey};
use crate::error::SolError;
use crate::keypair::Keypair;

/// Account indices are a single byte on the wire.
const MAX_ACCOUNT_KEYS: usize = 256;

/// Encode a `u16` in Solana's compact-u16 (7 bits per byte) format.
pub fn encode_compact_u16(value: u16) -> Vec<u8> {
    let mut rest = value as u32;
    let mut out = Vec::with_capacity(3);

    loop {
        let mut byte = (rest & 0x7f) as u8;
        rest >>= 7;
        if rest > 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if rest == 0 {
            break;
        }
    }

    out
}

/// One account an instruction touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolAccountMeta {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl SolAccountMeta {
    pub fn writable(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    pub fn readonly(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }
}

/// An instruction before it is compiled into a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolInstruction {
    pub program_id: Pubkey,
    pub accounts: Vec<SolAccountMeta>,
    pub data: Vec<u8>,
}

/// A compiled, unsigned legacy transaction message.
#[derive(Debug, Clone)]
pub struct SolTransaction {
    /// Deduplicated keys in canonical order:
    ///   1. writable signers (fee payer first)
    ///   2. read-only signers
    ///   3. writable non-signers
    ///   4. read-only non-signers
    pub account_keys: Vec<Pubkey>,
    pub num_required_signatures: u8,
    pub num_readonly_signed: u8,
    pub num_readonly_unsigned: u8,
    pub recent_blockhash: [u8; 32],
    pub compiled_instructions: Vec<CompiledInstruction>,
}

/// An instruction whose account references are indices into `account_keys`.
#[derive(Debug, Clone)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub account_indices: Vec<u8>,
    pub data: Vec<u8>,
}

impl SolTransaction {
    /// The keys that must sign, in signature-slot order.
    pub fn signer_keys(&self) -> &[Pubkey] {
        &self.account_keys[..self.num_required_signatures as usize]
    }
}

/// A fully signed transaction.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    pub signatures: Vec<[u8; 64]>,
    pub message: Vec<u8>,
}

impl SignedTransaction {
    /// The transaction id: the fee payer's signature.
    pub fn signature(&self) -> [u8; 64] {
        self.signatures[0]
    }

    /// Base58 form of [`Self::signature`], as explorers and RPC show it.
    pub fn signature_string(&self) -> String {
        bs58::encode(self.signature()).into_string()
    }

    /// Wire bytes ready for `sendTransaction`.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut wire = Vec::with_capacity(3 + 64 * self.signatures.len() + self.message.len());
        wire.extend_from_slice(&encode_compact_u16(self.signatures.len() as u16));
        for signature in &self.signatures {
            wire.extend_from_slice(signature);
        }
        wire.extend_from_slice(&self.message);
        wire
    }
}

/// Compile `instructions` into a message paid for by `fee_payer`.
pub fn compile_transaction(
    instructions: &[SolInstruction],
    fee_payer: &Pubkey,
    recent_blockhash: &[u8; 32],
) -> Result<SolTransaction, SolError> {
    if instructions.is_empty() {
        return Err(SolError::TransactionBuildError(
            "transaction has no instructions".into(),
        ));
    }

    let mut entries: Vec<SolAccountMeta> = Vec::new();
    let mut upsert = |meta: SolAccountMeta| {
        if let Some(entry) = entries.iter_mut().find(|e| e.pubkey == meta.pubkey) {
            entry.is_signer |= meta.is_signer;
            entry.is_writable |= meta.is_writable;
        } else {
            entries.push(meta);
        }
    };

    upsert(SolAccountMeta::writable(*fee_payer, true));
    for ix in instructions {
        for meta in &ix.accounts {
            upsert(*meta);
        }
        upsert(SolAccountMeta::readonly(ix.program_id, false));
    }

    if entries.len() > MAX_ACCOUNT_KEYS {
        return Err(SolError::TransactionBuildError(format!(
            "{} account keys exceed the limit of {MAX_ACCOUNT_KEYS}",
            entries.len()
        )));
    }

    // Stable sort: the fee payer was inserted first and ranks first.
    entries.sort_by_key(|e| match (e.is_signer, e.is_writable) {
        (true, true) => 0u8,
        (true, false) => 1,
        (false, true) => 2,
        (false, false) => 3,
    });

    let count = |f: fn(&SolAccountMeta) -> bool| entries.iter().filter(|e| f(e)).count() as u8;
    let num_required_signatures = count(|e| e.is_signer);
    let num_readonly_signed = count(|e| e.is_signer && !e.is_writable);
    let num_readonly_unsigned = count(|e| !e.is_signer && !e.is_writable);

    let account_keys: Vec<Pubkey> = entries.iter().map(|e| e.pubkey).collect();
    let index_of = |key: &Pubkey| -> Result<u8, SolError> {
        account_keys
            .iter()
            .position(|k| k == key)
            .map(|i| i as u8)
            .ok_or_else(|| {
                SolError::TransactionBuildError(format!(
                    "{} missing from account keys",
                    pubkey_to_string(key)
                ))
            })
    };

    let compiled_instructions = instructions
        .iter()
        .map(|ix| -> Result<CompiledInstruction, SolError> {
            Ok(CompiledInstruction {
                program_id_index: index_of(&ix.program_id)?,
                account_indices: ix
                    .accounts
                    .iter()
                    .map(|meta| index_of(&meta.pubkey))
                    .collect::<Result<_, _>>()?,
                data: ix.data.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SolTransaction {
        account_keys,
        num_required_signatures,
        num_readonly_signed,
        num_readonly_unsigned,
        recent_blockhash: *recent_blockhash,
        compiled_instructions,
    })
}

/// Serialize the message: the bytes every signer signs.
pub fn serialize_message(tx: &SolTransaction) -> Vec<u8> {
    let mut buf = Vec::with_capacity(256);

    buf.push(tx.num_required_signatures);
    buf.push(tx.num_readonly_signed);
    buf.push(tx.num_readonly_unsigned);

    buf.extend_from_slice(&encode_compact_u16(tx.account_keys.len() as u16));
    for key in &tx.account_keys {
        buf.extend_from_slice(key);
    }

    buf.extend_from_slice(&tx.recent_blockhash);

    buf.extend_from_slice(&encode_compact_u16(tx.compiled_instructions.len() as u16));
    for ix in &tx.compiled_instructions {
        buf.push(ix.program_id_index);
        buf.extend_from_slice(&encode_compact_u16(ix.account_indices.len() as u16));
        buf.extend_from_slice(&ix.account_indices);
        buf.extend_from_slice(&encode_compact_u16(ix.data.len() as u16));
        buf.extend_from_slice(&ix.data);
    }

    buf
}

/// Sign `tx` with `signers`.
///
/// Every required signer must have a keypair in `signers`; extra keypairs
/// are ignored.
pub fn sign_transaction(
    tx: &SolTransaction,
    signers: &[&Keypair],
) -> Result<SignedTransaction, SolError> {
    let message = serialize_message(tx);

    let signatures = tx
        .signer_keys()
        .iter()
        .map(|key| {
            signers
                .iter()
                .find(|kp| kp.pubkey() == *key)
                .map(|kp| kp.sign(&message))
                .ok_or_else(|| {
                    SolError::SigningError(format!(
                        "no keypair for required signer {}",
                        pubkey_to_string(key)
                    ))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SignedTransaction {
        signatures,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::SYSTEM_PROGRAM_ID;
    use ed25519_dalek::{Signature, VerifyingKey};

    const PROGRAM: Pubkey = [0x77; 32];

    fn sample_instruction(signer: Pubkey, target: Pubkey) -> SolInstruction {
        SolInstruction {
            program_id: PROGRAM,
            accounts: vec![
                SolAccountMeta::readonly(signer, true),
                SolAccountMeta::writable(target, false),
                SolAccountMeta::readonly(SYSTEM_PROGRAM_ID, false),
            ],
            data: vec![1, 2, 3],
        }
    }

    // -- compact-u16 ----------------------------------------------------------

    #[test]
    fn compact_u16_boundaries() {
        assert_eq!(encode_compact_u16(0), vec![0x00]);
        assert_eq!(encode_compact_u16(0x7f), vec![0x7f]);
        assert_eq!(encode_compact_u16(0x80), vec![0x80, 0x01]);
        assert_eq!(encode_compact_u16(0x3fff), vec![0xff, 0x7f]);
        assert_eq!(encode_compact_u16(0x4000), vec![0x80, 0x80, 0x01]);
        assert_eq!(encode_compact_u16(u16::MAX), vec![0xff, 0xff, 0x03]);
    }

    // -- compilation ----------------------------------------------------------

    #[test]
    fn fee_payer_comes_first() {
        let payer = [0x01; 32];
        let tx = compile_transaction(
            &[sample_instruction([0x02; 32], [0x03; 32])],
            &payer,
            &[0xAA; 32],
        )
        .unwrap();

        assert_eq!(tx.account_keys[0], payer);
        assert_eq!(tx.num_required_signatures, 2);
        assert_eq!(tx.num_readonly_signed, 1);
        // system program + instruction program
        assert_eq!(tx.num_readonly_unsigned, 2);
        assert_eq!(tx.recent_blockhash, [0xAA; 32]);
    }

    #[test]
    fn canonical_account_order() {
        let payer = [0x01; 32];
        let signer = [0x02; 32];
        let target = [0x03; 32];
        let tx = compile_transaction(&[sample_instruction(signer, target)], &payer, &[0; 32])
            .unwrap();

        assert_eq!(
            tx.account_keys,
            vec![payer, signer, target, SYSTEM_PROGRAM_ID, PROGRAM]
        );
    }

    #[test]
    fn duplicate_keys_merge_flags() {
        let payer = [0x01; 32];
        // The payer also appears as a read-only signer inside the instruction.
        let tx = compile_transaction(&[sample_instruction(payer, [0x03; 32])], &payer, &[0; 32])
            .unwrap();

        assert_eq!(tx.account_keys.len(), 4);
        assert_eq!(tx.num_required_signatures, 1);
        assert_eq!(tx.num_readonly_signed, 0);
    }

    #[test]
    fn compiled_indices_point_at_keys() {
        let payer = [0x01; 32];
        let signer = [0x02; 32];
        let target = [0x03; 32];
        let tx = compile_transaction(&[sample_instruction(signer, target)], &payer, &[0; 32])
            .unwrap();

        let cix = &tx.compiled_instructions[0];
        assert_eq!(tx.account_keys[cix.program_id_index as usize], PROGRAM);
        assert_eq!(cix.account_indices, vec![1, 2, 3]);
        assert_eq!(cix.data, vec![1, 2, 3]);
    }

    #[test]
    fn empty_instruction_list_fails() {
        assert!(compile_transaction(&[], &[0x01; 32], &[0; 32]).is_err());
    }

    // -- serialization --------------------------------------------------------

    #[test]
    fn message_layout() {
        let payer = [0x01; 32];
        let tx = compile_transaction(
            &[sample_instruction([0x02; 32], [0x03; 32])],
            &payer,
            &[0xCC; 32],
        )
        .unwrap();
        let msg = serialize_message(&tx);

        assert_eq!(&msg[..3], &[2, 1, 2]);
        assert_eq!(msg[3], 5);
        assert_eq!(&msg[4..36], &payer);

        let blockhash_at = 4 + 32 * 5;
        assert_eq!(&msg[blockhash_at..blockhash_at + 32], &[0xCC; 32]);

        // one instruction: program index, 3 accounts, 3 data bytes
        assert_eq!(
            &msg[blockhash_at + 32..],
            &[1, 4, 3, 1, 2, 3, 3, 1, 2, 3]
        );
    }

    // -- signing --------------------------------------------------------------

    #[test]
    fn signs_every_required_slot() {
        let payer = Keypair::from_seed(&[0x42; 32]);
        let co_signer = Keypair::from_seed(&[0x43; 32]);
        let tx = compile_transaction(
            &[sample_instruction(co_signer.pubkey(), [0x03; 32])],
            &payer.pubkey(),
            &[0xDD; 32],
        )
        .unwrap();

        // Signer order in the slice does not matter.
        let signed = sign_transaction(&tx, &[&co_signer, &payer]).unwrap();
        assert_eq!(signed.signatures.len(), 2);

        for (key, sig) in tx.signer_keys().iter().zip(&signed.signatures) {
            let vk = VerifyingKey::from_bytes(key).unwrap();
            assert!(vk
                .verify_strict(&signed.message, &Signature::from_bytes(sig))
                .is_ok());
        }
    }

    #[test]
    fn wire_format_prefixes_signatures() {
        let payer = Keypair::from_seed(&[0x42; 32]);
        let tx = compile_transaction(
            &[sample_instruction(payer.pubkey(), [0x03; 32])],
            &payer.pubkey(),
            &[0xDD; 32],
        )
        .unwrap();
        let signed = sign_transaction(&tx, &[&payer]).unwrap();
        let wire = signed.to_wire();

        assert_eq!(wire[0], 0x01);
        assert_eq!(&wire[1..65], &signed.signature());
        assert_eq!(&wire[65..], &signed.message[..]);
        assert_eq!(
            bs58::decode(signed.signature_string()).into_vec().unwrap(),
            signed.signature().to_vec()
        );
    }

    #[test]
    fn missing_signer_fails() {
        let payer = Keypair::from_seed(&[0x42; 32]);
        let tx = compile_transaction(
            &[sample_instruction([0x09; 32], [0x03; 32])],
            &payer.pubkey(),
            &[0xDD; 32],
        )
        .unwrap();

        let err = sign_transaction(&tx, &[&payer]).unwrap_err();
        assert!(err.to_string().contains("no keypair for required signer"));
    }

    #[test]
    fn signing_is_deterministic() {
        let payer = Keypair::from_seed(&[0x55; 32]);
        let tx = compile_transaction(
            &[sample_instruction(payer.pubkey(), [0x03; 32])],
            &payer.pubkey(),
            &[0x99; 32],
        )
        .unwrap();
        let a = sign_transaction(&tx, &[&payer]).unwrap();
        let b = sign_transaction(&tx, &[&payer]).unwrap();
        assert_eq!(a.to_wire(), b.to_wire());
    }
}
